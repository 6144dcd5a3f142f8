//! The authentication collaborator.
//!
//! [`Authenticator`] is the seam between the session manager and whatever
//! verifies credentials. The configured implementation is chosen once at
//! startup by [`build_authenticator`].

pub mod database;
pub mod fallback;
pub mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use wanderwise_core::config::{AuthConfig, AuthProvider};
use wanderwise_core::result::AppResult;
use wanderwise_database::repositories::ProfileRepository;
use wanderwise_entity::user::{Principal, ProfileUpdate, Registration};

use crate::password::{PasswordHasher, PasswordValidator};

pub use database::DatabaseAuthenticator;
pub use fallback::FallbackAuthenticator;
pub use mock::MockAuthenticator;

/// Verifies credentials and owns account mutations.
///
/// Implementations report rejected credentials as
/// `ErrorKind::Authentication`, and operations they cannot perform as
/// `ErrorKind::NotImplemented`.
#[async_trait]
pub trait Authenticator: Send + Sync + std::fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether `update_password` can succeed for this implementation.
    fn supports_password_change(&self) -> bool;

    /// Verify credentials and return the principal.
    async fn login(&self, email: &str, password: &str) -> AppResult<Principal>;

    /// Create an account. Fields have already been validated.
    async fn register(&self, registration: &Registration) -> AppResult<Principal>;

    /// Persist a partial profile change. Returns whether it was applied.
    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> AppResult<bool>;

    /// Change the password after verifying the current one.
    async fn update_password(&self, user_id: Uuid, current: &str, new: &str) -> AppResult<()>;

    /// Tell the collaborator the principal signed out.
    async fn logout(&self, user_id: Uuid) -> AppResult<()>;
}

/// Build the authenticator selected by `auth.provider`.
///
/// With `auth.fallback_to_mock`, the database authenticator is wrapped so
/// that outages fall back to the demo accounts.
pub fn build_authenticator(
    config: &AuthConfig,
    profiles: ProfileRepository,
) -> Arc<dyn Authenticator> {
    match config.provider {
        AuthProvider::Mock => {
            info!("Using mock authenticator with demo accounts");
            Arc::new(MockAuthenticator::new())
        }
        AuthProvider::Database => {
            let database = Arc::new(DatabaseAuthenticator::new(
                profiles,
                PasswordHasher::new(),
                PasswordValidator::new(config),
            ));
            if config.fallback_to_mock {
                info!("Using database authenticator with mock fallback");
                Arc::new(FallbackAuthenticator::new(
                    database,
                    Arc::new(MockAuthenticator::new()),
                ))
            } else {
                info!("Using database authenticator");
                database
            }
        }
    }
}
