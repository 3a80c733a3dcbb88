//! Request payload validation.
//!
//! Payload structs derive [`validator::Validate`] for per-field rules and may add
//! cross-field checks through [`ValidatePayload::validate_extra`]. Failures are
//! collected into [`FieldErrors`], which serializes as `{field: [message, ...]}`.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{FromRequestParts, Path, rejection::JsonRejection},
    http::request::Parts,
};
use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// Key used for errors that concern the payload as a whole.
pub const SCHEMA_FIELD: &str = "_schema";

/// Field-level validation messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// A single error about the payload as a whole.
    pub fn schema(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(SCHEMA_FIELD, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors = Self::default();
        for (field, errors) in errors.field_errors() {
            for error in errors {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                field_errors.add(field.to_string(), message);
            }
        }
        field_errors
    }
}

/// A payload that can be validated before any persistence happens.
pub trait ValidatePayload: Validate {
    /// Checks the derive attributes cannot express, such as matching fields.
    fn validate_extra(&self, _errors: &mut FieldErrors) {}
}

/// Unwrap a JSON body and run every validation rule on it.
///
/// Handlers take the body as `Result<Json<T>, JsonRejection>` so that a malformed
/// body is reported only once existence and ownership checks have passed.
pub fn validated<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError>
where
    T: ValidatePayload,
{
    let Json(payload) =
        payload.map_err(|rejection| ApiError::Validation(FieldErrors::schema(rejection.body_text())))?;

    let mut errors = match payload.validate() {
        Ok(()) => FieldErrors::default(),
        Err(errors) => FieldErrors::from(errors),
    };
    payload.validate_extra(&mut errors);

    if errors.is_empty() {
        Ok(payload)
    } else {
        Err(ApiError::Validation(errors))
    }
}

/// Numeric resource id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(id))
    }
}

/// Validate username characters.
///
/// Only ASCII letters, numbers, underscores and hyphens, which also keeps markup out of usernames.
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err("Username can only contain letters, numbers, underscores, and hyphens.");
    }

    Ok(())
}

/// bcrypt ignores everything past this many bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Validate password strength: at least one letter and one number, and no longer
/// than bcrypt actually hashes.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err("Password must be at most 72 bytes.");
    }

    let has_letter = password.chars().any(char::is_alphabetic);
    let has_number = password.chars().any(char::is_numeric);

    if !has_letter || !has_number {
        return Err("Password must contain at least one letter and one number.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize, Validate)]
    struct Sample {
        #[validate(
            required(message = "Missing data for required field."),
            length(min = 1, max = 5, message = "Length must be between 1 and 5.")
        )]
        name: Option<String>,
    }

    impl ValidatePayload for Sample {}

    #[test]
    fn test_field_errors_from_validator() {
        let sample = Sample {
            name: Some("far too long".to_string()),
        };
        let errors = FieldErrors::from(sample.validate().unwrap_err());

        assert_eq!(
            errors.get("name"),
            Some(&["Length must be between 1 and 5.".to_string()][..])
        );
    }

    #[test]
    fn test_validated_reports_missing_field() {
        let result = validated(Ok(Json(Sample { name: None })));

        match result {
            Err(ApiError::Validation(errors)) => {
                assert_eq!(
                    errors.get("name"),
                    Some(&["Missing data for required field.".to_string()][..])
                );
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validated_accepts_valid_payload() {
        let sample = validated(Ok(Json(Sample {
            name: Some("deck".to_string()),
        })))
        .expect("payload should be valid");

        assert_eq!(sample.name.as_deref(), Some("deck"));
    }

    #[test]
    fn test_schema_errors_serialize_under_schema_key() {
        let errors = FieldErrors::schema("Invalid input type.");
        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(json, serde_json::json!({ "_schema": ["Invalid input type."] }));
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("user123").is_ok());
        assert!(validate_username("user_name").is_ok());
        assert!(validate_username("user-name").is_ok());
        assert!(validate_username("user name").is_err());
        assert!(validate_username("<script>alert('xss')</script>").is_err());
        assert!(validate_username("user&test").is_err());
        assert!(validate_username("ユーザー名").is_err());
        assert!(validate_username("café").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("noNumbers").is_err());
        assert!(validate_password("12345678").is_err());
        assert!(validate_password(&format!("a1{}", "x".repeat(70))).is_ok());
        assert!(validate_password(&format!("a1{}", "x".repeat(71))).is_err());
        // 24 three-byte chars plus "a1" is 26 chars but 74 bytes
        assert!(validate_password(&format!("a1{}", "パ".repeat(24))).is_err());
    }
}
