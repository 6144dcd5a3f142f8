//! Opt-in chain that falls back to the demo accounts during outages.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use wanderwise_core::error::{AppError, ErrorKind};
use wanderwise_core::result::AppResult;
use wanderwise_entity::user::{Principal, ProfileUpdate, Registration};

use super::{Authenticator, MockAuthenticator};

/// Tries the primary authenticator first and uses the mock when the
/// primary is unreachable or broken.
///
/// Rejections (bad credentials, invalid fields, duplicates) never fall
/// back. Principals obtained from the mock keep being routed to it.
#[derive(Debug)]
pub struct FallbackAuthenticator {
    primary: Arc<dyn Authenticator>,
    mock: Arc<MockAuthenticator>,
    served_by_mock: Mutex<HashSet<Uuid>>,
}

impl FallbackAuthenticator {
    /// Creates a fallback chain.
    pub fn new(primary: Arc<dyn Authenticator>, mock: Arc<MockAuthenticator>) -> Self {
        Self {
            primary,
            mock,
            served_by_mock: Mutex::new(HashSet::new()),
        }
    }

    async fn is_mock_identity(&self, user_id: Uuid) -> bool {
        self.served_by_mock.lock().await.contains(&user_id) || self.mock.knows(user_id).await
    }

    async fn remember(&self, principal: &Principal) {
        self.served_by_mock.lock().await.insert(principal.id);
    }
}

/// Whether a primary failure warrants trying the mock.
fn should_fall_back(err: &AppError) -> bool {
    !matches!(
        err.kind,
        ErrorKind::Authentication
            | ErrorKind::Authorization
            | ErrorKind::Validation
            | ErrorKind::Conflict
            | ErrorKind::NotFound
    )
}

#[async_trait]
impl Authenticator for FallbackAuthenticator {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn supports_password_change(&self) -> bool {
        self.primary.supports_password_change()
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<Principal> {
        match self.primary.login(email, password).await {
            Err(e) if should_fall_back(&e) => {
                warn!(
                    primary = self.primary.name(),
                    error = %e,
                    "Primary authenticator failed, using demo accounts"
                );
                let principal = self.mock.login(email, password).await?;
                self.remember(&principal).await;
                Ok(principal)
            }
            other => other,
        }
    }

    async fn register(&self, registration: &Registration) -> AppResult<Principal> {
        match self.primary.register(registration).await {
            Err(e) if should_fall_back(&e) => {
                warn!(
                    primary = self.primary.name(),
                    error = %e,
                    "Primary authenticator failed, registering demo account"
                );
                let principal = self.mock.register(registration).await?;
                self.remember(&principal).await;
                Ok(principal)
            }
            other => other,
        }
    }

    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> AppResult<bool> {
        if self.is_mock_identity(user_id).await {
            return self.mock.update_profile(user_id, update).await;
        }
        self.primary.update_profile(user_id, update).await
    }

    async fn update_password(&self, user_id: Uuid, current: &str, new: &str) -> AppResult<()> {
        if self.is_mock_identity(user_id).await {
            return self.mock.update_password(user_id, current, new).await;
        }
        self.primary.update_password(user_id, current, new).await
    }

    async fn logout(&self, user_id: Uuid) -> AppResult<()> {
        if self.served_by_mock.lock().await.remove(&user_id) || self.mock.knows(user_id).await {
            return self.mock.logout(user_id).await;
        }
        self.primary.logout(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authenticator::mock::DEMO_PASSWORD;

    /// Primary that always fails with a fixed error kind.
    #[derive(Debug)]
    struct BrokenPrimary(ErrorKind);

    #[async_trait]
    impl Authenticator for BrokenPrimary {
        fn name(&self) -> &'static str {
            "broken"
        }
        fn supports_password_change(&self) -> bool {
            true
        }
        async fn login(&self, _: &str, _: &str) -> AppResult<Principal> {
            Err(AppError::new(self.0, "primary failed"))
        }
        async fn register(&self, _: &Registration) -> AppResult<Principal> {
            Err(AppError::new(self.0, "primary failed"))
        }
        async fn update_profile(&self, _: Uuid, _: &ProfileUpdate) -> AppResult<bool> {
            Err(AppError::new(self.0, "primary failed"))
        }
        async fn update_password(&self, _: Uuid, _: &str, _: &str) -> AppResult<()> {
            Err(AppError::new(self.0, "primary failed"))
        }
        async fn logout(&self, _: Uuid) -> AppResult<()> {
            Err(AppError::new(self.0, "primary failed"))
        }
    }

    fn chain(kind: ErrorKind) -> FallbackAuthenticator {
        FallbackAuthenticator::new(
            Arc::new(BrokenPrimary(kind)),
            Arc::new(MockAuthenticator::new()),
        )
    }

    #[tokio::test]
    async fn test_outage_falls_back_to_demo_account() {
        let auth = chain(ErrorKind::Database);
        let principal = auth
            .login("traveler@wanderwise.demo", DEMO_PASSWORD)
            .await
            .unwrap();
        assert_eq!(principal.username, "demo_traveler");

        let err = auth
            .update_password(principal.id, DEMO_PASSWORD, "new-pass-123")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotImplemented);
    }

    #[tokio::test]
    async fn test_rejection_does_not_fall_back() {
        let auth = chain(ErrorKind::Authentication);
        let err = auth
            .login("traveler@wanderwise.demo", DEMO_PASSWORD)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "primary failed");
    }
}
