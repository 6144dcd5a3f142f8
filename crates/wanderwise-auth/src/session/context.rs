//! Read-only snapshot of the session handed to services.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use wanderwise_core::error::AppError;
use wanderwise_core::result::AppResult;
use wanderwise_entity::session::SessionRecord;
use wanderwise_entity::user::{Principal, UserRole};

use crate::rbac::{Permission, RbacEnforcer};

/// Immutable view of the session at one point in time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionContext {
    /// The signed-in principal, if any.
    pub principal: Option<Principal>,
    /// Last recorded activity.
    pub last_activity: Option<DateTime<Utc>>,
    /// When the session expires without further activity.
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionContext {
    /// A snapshot with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Snapshot of a live record.
    pub fn from_record(record: &SessionRecord) -> Self {
        let last_activity = record.last_activity();
        Self {
            principal: Some(record.user.clone()),
            last_activity: Some(last_activity),
            expires_at: Some(last_activity + chrono::Duration::milliseconds(record.timeout_ms)),
        }
    }

    /// Whether a principal is signed in.
    pub fn is_logged_in(&self) -> bool {
        self.principal.is_some()
    }

    /// ID of the signed-in principal.
    pub fn user_id(&self) -> Option<Uuid> {
        self.principal.as_ref().map(|p| p.id)
    }

    /// Role of the signed-in principal.
    pub fn role(&self) -> Option<UserRole> {
        self.principal.as_ref().map(|p| p.role)
    }

    /// The signed-in principal, or an authentication error.
    pub fn require_principal(&self) -> AppResult<&Principal> {
        self.principal
            .as_ref()
            .ok_or_else(|| AppError::authentication("You are not logged in"))
    }

    /// Whether the principal has exactly `role`.
    pub fn is_role(&self, role: UserRole) -> bool {
        self.role() == Some(role)
    }

    /// Whether the principal's role is at least `role`.
    pub fn is_min_role(&self, role: UserRole) -> bool {
        self.role().is_some_and(|r| r.has_at_least(&role))
    }

    /// Whether the principal holds `permission` under `rbac`.
    pub fn has_permission(&self, rbac: &RbacEnforcer, permission: Permission) -> bool {
        self.role()
            .is_some_and(|r| rbac.has_permission(&r, &permission))
    }
}
