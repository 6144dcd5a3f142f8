//! Registration and password policy.
//!
//! Violations are collected rather than returned one at a time, so a
//! registration form can show every problem at once.

use validator::Validate;

use wanderwise_core::config::AuthConfig;
use wanderwise_core::error::AppError;
use wanderwise_entity::user::Registration;

/// Checks new passwords and registration fields.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Every policy violation of `password`, in a stable order.
    pub fn violations(&self, password: &str) -> Vec<String> {
        let mut violations = Vec::new();

        if password.chars().count() < self.min_length {
            violations.push(format!(
                "Password must be at least {} characters long",
                self.min_length
            ));
        }
        if !password.chars().any(char::is_alphabetic) {
            violations.push("Password must contain at least one letter".to_string());
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            violations.push("Password must contain at least one digit".to_string());
        }

        if violations.is_empty() {
            let estimate = zxcvbn::zxcvbn(password, &[]);
            if estimate.score() < zxcvbn::Score::Two {
                violations.push(
                    "Password is too easy to guess. Try a longer phrase.".to_string(),
                );
            }
        }

        violations
    }

    /// Validate a password, reporting all violations in one error.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let violations = self.violations(password);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(violations.join("; ")))
        }
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(&self, current: &str, new: &str) -> Result<(), AppError> {
        if current == new {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }

    /// Every problem with a registration: field rules first, then the password.
    pub fn registration_violations(&self, registration: &Registration) -> Vec<String> {
        let mut messages = Vec::new();

        if let Err(errors) = registration.validate() {
            let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
            fields.sort_by(|a, b| a.0.cmp(&b.0));
            for (field, field_errors) in fields {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"));
                    messages.push(message);
                }
            }
        }

        messages.extend(self.violations(&registration.password));
        messages
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new(&AuthConfig::default())
    }
}
