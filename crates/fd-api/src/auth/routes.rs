use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use axum_extra::extract::PrivateCookieJar;
use fd_db::repositories::user as user_repo;
use serde_json::{Value, json};

use super::{cookies, jwt, middleware::AuthUser, password};
use crate::{
    ApiState,
    error::ApiError,
    metrics::record_auth_event,
    user::model::{
        LoginRequest, LoginResponse, NewUser, RegisterUser, UserResponse, normalize_email,
    },
    validation::{FieldErrors, validated},
};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

async fn register(
    State(state): State<ApiState>,
    payload: Result<Json<RegisterUser>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let new_user = NewUser::from(validated(payload)?);

    let password_hash = password::hash_password(new_user.password, state.bcrypt_cost).await?;

    let user = user_repo::create_user(
        &state.pool,
        &new_user.username,
        &new_user.email,
        &password_hash,
    )
    .await
    .map_err(unique_violation_to_field_error)?;

    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok(Json(UserResponse::from(user)))
}

/// Turn a duplicate username or email into a field error instead of a 500.
fn unique_violation_to_field_error(error: sqlx::Error) -> ApiError {
    let field = match &error {
        sqlx::Error::Database(db_err) => match db_err.constraint() {
            Some("users_username_key") => Some(("username", "Username is already taken.")),
            Some("users_email_key") => Some(("email", "Email is already registered.")),
            _ => None,
        },
        _ => None,
    };

    match field {
        Some((field, message)) => {
            let mut errors = FieldErrors::default();
            errors.add(field, message);
            ApiError::Validation(errors)
        }
        None => ApiError::Database(error),
    }
}

async fn login(
    State(state): State<ApiState>,
    jar: PrivateCookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(PrivateCookieJar, Json<LoginResponse>), ApiError> {
    let credentials = validated(payload)?;
    let email = normalize_email(&credentials.email.unwrap_or_default());
    let password = credentials.password.unwrap_or_default();

    let Some(user) = user_repo::find_by_email(&state.pool, &email).await? else {
        // Same bcrypt work as a real check so unknown emails don't answer faster
        password::hash_password(password, state.bcrypt_cost).await?;
        record_auth_event("login", false);
        return Err(ApiError::Unauthorized);
    };

    if !password::verify_password(password, user.password_hash.clone()).await? {
        record_auth_event("login", false);
        return Err(ApiError::Unauthorized);
    }

    let token = jwt::generate_jwt_token(user.id, &state.jwt_secret, state.jwt_expiry_hours)?;
    let jar = jar.add(cookies::create_auth_cookie(
        token.clone(),
        &state.environment,
        state.jwt_expiry_hours,
    ));

    record_auth_event("login", true);
    tracing::info!(user_id = user.id, "user logged in");

    Ok((
        jar,
        Json(LoginResponse {
            token,
            message: format!("Welcome back {}!", user.username),
        }),
    ))
}

async fn logout(jar: PrivateCookieJar) -> (PrivateCookieJar, Json<Value>) {
    let jar = jar.remove(cookies::removal_auth_cookie());

    (jar, Json(json!({ "message": "Logged out." })))
}

async fn me(auth_user: AuthUser, State(state): State<ApiState>) -> Result<Json<UserResponse>, ApiError> {
    let user = user_repo::find_by_id(&state.pool, auth_user.id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(UserResponse::from(user)))
}
