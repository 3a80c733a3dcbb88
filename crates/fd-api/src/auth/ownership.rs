use super::AuthUser;
use crate::error::ApiError;

/// Allow a mutation only when the caller owns the resource.
///
/// Runs after the existence check, so a non-owner always sees `message` (401) and never
/// a not-found.
pub fn ensure_owner(owner_id: i64, caller: &AuthUser, message: &'static str) -> Result<(), ApiError> {
    if owner_id == caller.id {
        return Ok(());
    }

    tracing::info!(
        caller_id = caller.id,
        owner_id,
        "rejected mutation of a resource owned by another user"
    );
    Err(ApiError::Forbidden(message))
}
