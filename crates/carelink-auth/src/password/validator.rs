//! Password policy enforcement for new passwords.

use carelink_core::config::AuthConfig;
use carelink_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length as usize,
        }
    }

    /// Validates a password against all configured policies.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(|c| c.is_alphabetic()) {
            return Err(AppError::validation(
                "Password must contain at least one letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig {
            jwt_secret: "secret".to_string(),
            jwt_access_ttl_minutes: 15,
            jwt_refresh_ttl_hours: 24,
            password_min_length: 8,
        })
    }

    #[test]
    fn test_rejects_short_password() {
        assert!(validator().validate("ab1").is_err());
    }

    #[test]
    fn test_requires_letter_and_digit() {
        assert!(validator().validate("12345678").is_err());
        assert!(validator().validate("abcdefgh").is_err());
        assert!(validator().validate("abcdefg1").is_ok());
    }
}
