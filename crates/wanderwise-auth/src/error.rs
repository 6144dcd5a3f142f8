//! User-facing authentication errors.

use thiserror::Error;
use tracing::warn;

use wanderwise_core::error::{AppError, ErrorKind};

/// Errors returned by session operations.
///
/// The display text is short and safe to show to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The authenticator rejected the credentials.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// One or more fields were rejected. Every violation is listed.
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    /// The active authenticator cannot perform the operation.
    #[error("{0}")]
    Unsupported(String),

    /// The operation needs a signed-in principal.
    #[error("You are not logged in")]
    NotLoggedIn,

    /// The authenticator or the session storage failed.
    #[error("Authentication service is unavailable. Please try again later.")]
    Unavailable,
}

impl AuthError {
    /// Map a collaborator failure to the error shown to the user.
    ///
    /// The original error is logged; only its category reaches the caller.
    pub fn from_collaborator(operation: &str, err: AppError) -> Self {
        match err.kind {
            ErrorKind::Authentication => Self::InvalidCredentials,
            ErrorKind::Validation | ErrorKind::Conflict => Self::Validation(vec![err.message]),
            ErrorKind::NotImplemented => Self::Unsupported(err.message),
            _ => {
                warn!(operation, error = %err, "Authentication collaborator failed");
                Self::Unavailable
            }
        }
    }

    /// The individual messages carried by this error.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}
