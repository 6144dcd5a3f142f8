//! RBAC enforcement over the role hierarchy and permission policies.

use wanderwise_core::error::AppError;
use wanderwise_entity::user::UserRole;

use super::policies::{Permission, RbacPolicies};

/// Role and permission checks for a principal's role.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates an enforcer with the default policy set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Whether the role holds the permission.
    pub fn has_permission(&self, role: &UserRole, permission: &Permission) -> bool {
        self.policies.has_permission(role, permission)
    }

    /// Like [`has_permission`](Self::has_permission), as a `Result`.
    pub fn require_permission(
        &self,
        role: &UserRole,
        permission: &Permission,
    ) -> Result<(), AppError> {
        if self.has_permission(role, permission) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{role}' does not have permission '{permission:?}'"
            )))
        }
    }

    /// Whether `actual` is at least `minimum` in traveler < tour_guide < admin.
    pub fn is_min_role(&self, actual: &UserRole, minimum: &UserRole) -> bool {
        actual.has_at_least(minimum)
    }

    /// Like [`is_min_role`](Self::is_min_role), as a `Result`.
    pub fn require_minimum_role(
        &self,
        actual: &UserRole,
        minimum: &UserRole,
    ) -> Result<(), AppError> {
        if self.is_min_role(actual, minimum) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{actual}' is insufficient; minimum required: '{minimum}'"
            )))
        }
    }
}
