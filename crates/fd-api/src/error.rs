use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::validation::FieldErrors;

/// Body message for every failure whose detail stays server-side.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong.";
/// Body message for every credential failure, whatever the cause.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(String),
    #[error("Unauthorized")]
    Unauthorized,
    /// Valid credentials, but the caller does not own the resource.
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            // Ownership failures share the status of missing credentials
            Self::Unauthorized | Self::Forbidden(_) => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database(_) | Self::Jwt(_) | Self::Hash(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = match self {
            Self::NotFound(message) | Self::Forbidden(message) => json!({ "message": message }),
            Self::BadRequest(message) => json!({ "message": message }),
            Self::Unauthorized => json!({ "message": UNAUTHORIZED_MESSAGE }),
            Self::Validation(errors) => json!({
                "errors": errors,
                "message": GENERIC_ERROR_MESSAGE,
            }),
            Self::Database(_) | Self::Jwt(_) | Self::Hash(_) | Self::Internal(_) => {
                json!({ "message": GENERIC_ERROR_MESSAGE })
            }
        };

        (status, Json(body)).into_response()
    }
}
