//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use wanderwise_entity::user::UserRole;

/// A platform-level permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    // Travel
    /// Book published tours.
    BookTours,
    /// Pay for bookings and itineraries.
    MakePayments,
    /// Ask guides for a custom trip.
    CreateTourRequests,
    /// Write reviews for completed tours.
    WriteReviews,

    // Shared
    /// Send direct messages.
    SendMessages,
    /// See one's own activity feed.
    ViewOwnActivity,

    // Guiding
    /// Publish and edit one's own tours.
    ManageOwnTours,
    /// Answer tour requests with itineraries.
    RespondToTourRequests,
    /// Confirm or decline bookings of one's tours.
    ManageBookings,
    /// See payouts.
    ViewEarnings,

    // Administration
    /// Manage any account.
    ManageUsers,
    /// Read the security audit log.
    ViewAuditLog,
    /// Change platform security settings.
    ManageSecurity,
}

/// Mapping from each non-admin role to its permissions.
///
/// Admin is not listed: it holds every permission.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    policies: HashMap<UserRole, HashSet<Permission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let traveler: HashSet<_> = [
            Permission::BookTours,
            Permission::MakePayments,
            Permission::CreateTourRequests,
            Permission::WriteReviews,
            Permission::SendMessages,
            Permission::ViewOwnActivity,
        ]
        .into_iter()
        .collect();

        let guide: HashSet<_> = [
            Permission::SendMessages,
            Permission::ViewOwnActivity,
            Permission::ManageOwnTours,
            Permission::RespondToTourRequests,
            Permission::ManageBookings,
            Permission::ViewEarnings,
        ]
        .into_iter()
        .collect();

        let mut policies = HashMap::new();
        policies.insert(UserRole::Traveler, traveler);
        policies.insert(UserRole::TourGuide, guide);
        Self { policies }
    }

    /// Whether `role` holds `permission`.
    pub fn has_permission(&self, role: &UserRole, permission: &Permission) -> bool {
        if role.is_admin() {
            return true;
        }
        self.policies
            .get(role)
            .is_some_and(|set| set.contains(permission))
    }

    /// Grant an extra permission to a role.
    pub fn grant(&mut self, role: UserRole, permission: Permission) {
        self.policies.entry(role).or_default().insert(permission);
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
