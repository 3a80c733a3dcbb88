use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    extract::{PrivateCookieJar, cookie::Key},
    headers::{Authorization, authorization::Bearer},
};
use fd_db::repositories::user as user_repo;
use sqlx::PgPool;

use super::{cookies::AUTH_COOKIE, jwt::verify_jwt_token};
use crate::{error::ApiError, metrics::record_auth_event, state::AuthConfig};

/// Authenticated caller, resolved from the request credentials.
///
/// Taking this extractor as a handler argument guards the route: when the request
/// carries no usable credential the handler body never runs and the response is a
/// 401 `{"message": "Unauthorized"}`.
///
/// Credentials are read from `Authorization: Bearer <jwt>` first, then from the
/// private `auth_token` cookie. Missing, malformed or expired tokens and tokens for
/// users that no longer exist are indistinguishable to the client.
///
/// # Example
/// ```
/// use axum::extract::State;
/// use fd_api::{ApiState, auth::AuthUser, error::ApiError};
///
/// async fn protected_route(
///     auth_user: AuthUser,
///     State(state): State<ApiState>,
/// ) -> Result<(), ApiError> {
///     // auth_user.id, auth_user.username and auth_user.email are available
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AuthConfig: FromRef<S>,
    Key: FromRef<S>,
    PgPool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_config = AuthConfig::from_ref(state);

        let token = match bearer_token(parts, state).await {
            Some(token) => token,
            None => cookie_token(parts, state)
                .await
                .ok_or_else(|| reject("missing credential"))?,
        };

        let claims = verify_jwt_token(&token, &auth_config.jwt_secret)
            .map_err(|_| reject("invalid or expired token"))?;

        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| reject("malformed subject"))?;

        // A database failure here is a server fault, not a credential problem
        let user = user_repo::find_by_id(&PgPool::from_ref(state), user_id)
            .await?
            .ok_or_else(|| reject("unknown user"))?;

        record_auth_event("guard", true);

        Ok(Self {
            id: user.id,
            username: user.username,
            email: user.email,
        })
    }
}

async fn bearer_token<S>(parts: &mut Parts, state: &S) -> Option<String>
where
    S: Send + Sync,
{
    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|TypedHeader(auth)| auth.token().to_owned())
}

async fn cookie_token<S>(parts: &mut Parts, state: &S) -> Option<String>
where
    Key: FromRef<S>,
    S: Send + Sync,
{
    let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
        .await
        .ok()?;

    jar.get(AUTH_COOKIE).map(|cookie| cookie.value().to_owned())
}

fn reject(reason: &'static str) -> ApiError {
    tracing::debug!(reason, "rejected request credentials");
    record_auth_event("guard", false);
    ApiError::Unauthorized
}
