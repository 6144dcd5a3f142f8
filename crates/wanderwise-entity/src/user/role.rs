//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available on the platform.
///
/// Roles are ordered by privilege level: Admin > TourGuide > Traveler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Books tours and sends trip requests. Older sessions stored this as `user`.
    #[serde(alias = "user")]
    Traveler,
    /// Offers tours and answers trip requests.
    TourGuide,
    /// Full platform administrator.
    Admin,
}

impl UserRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Admin => 3,
            Self::TourGuide => 2,
            Self::Traveler => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &UserRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Traveler => "traveler",
            Self::TourGuide => "tour_guide",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = wanderwise_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "traveler" | "user" => Ok(Self::Traveler),
            "tour_guide" => Ok(Self::TourGuide),
            "admin" => Ok(Self::Admin),
            _ => Err(wanderwise_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: traveler, tour_guide, admin"
            ))),
        }
    }
}
