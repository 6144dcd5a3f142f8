//! Authenticator backed by the `profiles` table.

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use wanderwise_core::error::AppError;
use wanderwise_core::result::AppResult;
use wanderwise_database::repositories::ProfileRepository;
use wanderwise_entity::user::{Principal, ProfileUpdate, Registration};

use super::Authenticator;
use crate::password::{PasswordHasher, PasswordValidator};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Verifies credentials against Argon2id hashes stored in `profiles`.
#[derive(Debug, Clone)]
pub struct DatabaseAuthenticator {
    profiles: ProfileRepository,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl DatabaseAuthenticator {
    /// Creates a new database authenticator.
    pub fn new(
        profiles: ProfileRepository,
        hasher: PasswordHasher,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            profiles,
            hasher,
            validator,
        }
    }
}

#[async_trait]
impl Authenticator for DatabaseAuthenticator {
    fn name(&self) -> &'static str {
        "database"
    }

    fn supports_password_change(&self) -> bool {
        true
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<Principal> {
        let row = self
            .profiles
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_CREDENTIALS))?;

        if !self.hasher.verify_password(password, &row.password_hash)? {
            debug!(user_id = %row.id, "Password mismatch");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        if !row.is_active {
            return Err(AppError::authentication("This account has been deactivated"));
        }

        info!(user_id = %row.id, "Credentials verified");
        Ok(row.into_principal())
    }

    async fn register(&self, registration: &Registration) -> AppResult<Principal> {
        let hash = self.hasher.hash_password(&registration.password)?;
        let row = self
            .profiles
            .create(Uuid::new_v4(), registration, &hash)
            .await?;

        info!(user_id = %row.id, role = %registration.role, "Account created");
        Ok(row.into_principal())
    }

    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> AppResult<bool> {
        self.profiles.update(user_id, update).await
    }

    async fn update_password(&self, user_id: Uuid, current: &str, new: &str) -> AppResult<()> {
        let row = self
            .profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Profile {user_id} not found")))?;

        if !self.hasher.verify_password(current, &row.password_hash)? {
            return Err(AppError::authentication("Current password is incorrect"));
        }

        self.validator.validate_not_same(current, new)?;
        self.validator.validate(new)?;

        let hash = self.hasher.hash_password(new)?;
        self.profiles.update_password_hash(user_id, &hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    async fn logout(&self, user_id: Uuid) -> AppResult<()> {
        // Sessions live client-side; there is nothing to revoke.
        debug!(user_id = %user_id, "Logout acknowledged");
        Ok(())
    }
}
