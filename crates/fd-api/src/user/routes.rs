use axum::{Json, Router, extract::State, routing::get};
use fd_db::repositories::user as user_repo;

use super::model::UserResponse;
use crate::{ApiState, error::ApiError, validation::ResourceId};

/// Create the user routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/users", get(get_all_users))
        .route("/users/{id}", get(get_user_by_id))
}

async fn get_all_users(State(state): State<ApiState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = user_repo::list_users(&state.pool).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

async fn get_user_by_id(
    State(state): State<ApiState>,
    ResourceId(id): ResourceId,
) -> Result<Json<UserResponse>, ApiError> {
    let user = user_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound("No user found"))?;

    Ok(Json(UserResponse::from(user)))
}
