use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::{auth, card, deck, state::ApiState, user};

/// Build the application router: `/health` at the root, everything else under `/api`.
pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        // Must follow every route it should apply to
        .method_not_allowed_fallback(handler_405)
        .fallback(handler_404)
}

fn api_routes() -> Router<ApiState> {
    Router::new()
        .merge(auth::routes())
        .merge(user::routes())
        .merge(deck::routes())
        .merge(card::routes())
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "The requested resource was not found" })),
    )
}

async fn handler_405() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "message": "Method not allowed" })),
    )
}
