//! The persisted session record.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::user::Principal;

/// A session as persisted in the key-value store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The logged-in principal.
    pub user: Principal,
    /// The logged-in flag.
    pub is_logged_in: bool,
    /// Last user activity, in milliseconds since the Unix epoch.
    pub last_activity_ms: i64,
    /// Inactivity timeout in milliseconds.
    pub timeout_ms: i64,
}

impl SessionRecord {
    /// Creates a fresh record stamped at `now`.
    pub fn new(user: Principal, now: DateTime<Utc>, timeout: Duration) -> Self {
        Self {
            user,
            is_logged_in: true,
            last_activity_ms: now.timestamp_millis(),
            timeout_ms: timeout.num_milliseconds(),
        }
    }

    /// Last activity as a timestamp.
    pub fn last_activity(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.last_activity_ms)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Whether the session is still inside its inactivity window at `now`.
    ///
    /// Valid iff `now - last_activity < timeout` and the logged-in flag is set.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.is_logged_in && is_within_timeout(self.last_activity_ms, self.timeout_ms, now)
    }
}

/// The raw validity rule shared by stored records and partially-read keys.
pub fn is_within_timeout(last_activity_ms: i64, timeout_ms: i64, now: DateTime<Utc>) -> bool {
    now.timestamp_millis().saturating_sub(last_activity_ms) < timeout_ms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{Profile, UserRole};
    use uuid::Uuid;

    fn record_at(last_activity: DateTime<Utc>) -> SessionRecord {
        let user = Principal {
            id: Uuid::new_v4(),
            email: "kai@example.com".to_string(),
            username: "kai".to_string(),
            role: UserRole::Traveler,
            profile: Profile::default(),
            date_of_birth: None,
            gender: None,
            created_at: last_activity,
            is_active: true,
        };
        SessionRecord::new(user, last_activity, Duration::hours(24))
    }

    #[test]
    fn test_valid_inside_window() {
        let now = Utc::now();
        let record = record_at(now - Duration::hours(23));
        assert!(record.is_valid_at(now));
    }

    #[test]
    fn test_invalid_exactly_at_timeout() {
        let now = Utc::now();
        let record = record_at(now - Duration::hours(24));
        assert!(!record.is_valid_at(now));
    }

    #[test]
    fn test_expiry_ignores_other_fields() {
        let now = Utc::now();
        for hours in [24, 25, 48, 24 * 365] {
            let record = record_at(now - Duration::hours(hours));
            assert!(!record.is_valid_at(now), "{hours}h old session must be invalid");
        }
    }

    #[test]
    fn test_logged_out_flag_invalidates() {
        let now = Utc::now();
        let mut record = record_at(now);
        record.is_logged_in = false;
        assert!(!record.is_valid_at(now));
    }
}
