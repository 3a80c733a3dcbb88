use chrono::{DateTime, Utc};
use fd_db::models::User;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{FieldErrors, ValidatePayload, validate_password, validate_username};

/// Registration payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 3, max = 30, message = "Username must be between 3 and 30 characters.")
    )]
    pub username: Option<String>,
    #[validate(
        required(message = "Missing data for required field."),
        email(message = "Not a valid email address."),
        length(max = 255, message = "Email must be at most 255 characters.")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 8, max = 72, message = "Password must be between 8 and 72 characters.")
    )]
    pub password: Option<String>,
    #[validate(required(message = "Missing data for required field."))]
    pub password_confirmation: Option<String>,
}

impl ValidatePayload for RegisterUser {
    fn validate_extra(&self, errors: &mut FieldErrors) {
        if let Some(Err(message)) = self.username.as_deref().map(validate_username) {
            errors.add("username", message);
        }
        if let Some(Err(message)) = self.password.as_deref().map(validate_password) {
            errors.add("password", message);
        }
        if let (Some(password), Some(confirmation)) = (&self.password, &self.password_confirmation)
            && password != confirmation
        {
            errors.add("password_confirmation", "Passwords do not match.");
        }
    }
}

/// Registration data once every rule has passed.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterUser> for NewUser {
    fn from(payload: RegisterUser) -> Self {
        Self {
            username: payload.username.unwrap_or_default(),
            email: normalize_email(&payload.email.unwrap_or_default()),
            password: payload.password.unwrap_or_default(),
        }
    }
}

/// Emails are compared case-insensitively, so they are stored trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Login payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required(message = "Missing data for required field."))]
    pub email: Option<String>,
    #[validate(required(message = "Missing data for required field."))]
    pub password: Option<String>,
}

impl ValidatePayload for LoginRequest {}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub message: String,
}

/// Public view of a user; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(
        username: &str,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> RegisterUser {
        RegisterUser {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            password_confirmation: Some(confirmation.to_string()),
        }
    }

    fn errors_for(payload: &RegisterUser) -> FieldErrors {
        let mut errors = payload.validate().err().map(FieldErrors::from).unwrap_or_default();
        payload.validate_extra(&mut errors);
        errors
    }

    #[test]
    fn test_valid_registration() {
        let payload = register("kanji_fan", "fan@example.com", "password123", "password123");

        assert!(errors_for(&payload).is_empty());
    }

    #[test]
    fn test_registration_field_errors() {
        let payload = register("a b", "not-an-email", "short", "different");
        let errors = errors_for(&payload);

        assert!(errors.get("username").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());
        assert_eq!(
            errors.get("password_confirmation"),
            Some(&["Passwords do not match.".to_string()][..])
        );
    }

    #[test]
    fn test_registration_missing_fields() {
        let payload = RegisterUser {
            username: None,
            email: None,
            password: None,
            password_confirmation: None,
        };
        let errors = errors_for(&payload);

        for field in ["username", "email", "password", "password_confirmation"] {
            assert_eq!(
                errors.get(field),
                Some(&["Missing data for required field.".to_string()][..]),
                "field {field}"
            );
        }
    }

    #[test]
    fn test_email_longer_than_column_is_rejected() {
        let email = format!(
            "{}@{}.{}.{}.com",
            "a".repeat(64),
            "b".repeat(63),
            "c".repeat(63),
            "d".repeat(63)
        );
        assert!(email.len() > 255);

        let errors = errors_for(&register("kanji_fan", &email, "password123", "password123"));

        let email_errors = errors.get("email").expect("email should be rejected");
        assert!(email_errors.contains(&"Email must be at most 255 characters.".to_string()));
    }

    #[test]
    fn test_password_past_bcrypt_limit_is_rejected() {
        let password = format!("a1{}", "é".repeat(40));

        let errors = errors_for(&register("kanji_fan", "fan@example.com", &password, &password));

        assert_eq!(
            errors.get("password"),
            Some(&["Password must be at most 72 bytes.".to_string()][..])
        );
    }

    #[test]
    fn test_new_user_normalizes_email() {
        let payload = register("kanji_fan", " Fan@Example.COM ", "password123", "password123");

        assert_eq!(NewUser::from(payload).email, "fan@example.com");
    }

    #[test]
    fn test_user_response_omits_hash() {
        let user = User {
            id: 1,
            username: "kanji_fan".to_string(),
            email: "fan@example.com".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert_eq!(json["username"], "kanji_fan");
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("secret"));
    }
}
