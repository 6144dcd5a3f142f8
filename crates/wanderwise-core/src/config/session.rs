//! Session lifetime configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Session lifetime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Inactivity window in hours after which a stored session is expired.
    #[serde(default = "default_timeout_hours")]
    pub timeout_hours: u64,
    /// How often the expiry monitor re-checks the stored session, in seconds.
    #[serde(default = "default_check_interval")]
    pub check_interval_seconds: u64,
    /// Whether the expiry monitor is started on login.
    #[serde(default = "default_true")]
    pub monitor_enabled: bool,
}

impl SessionConfig {
    /// The inactivity timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_hours * 3600)
    }

    /// The expiry check interval as a [`Duration`].
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_seconds)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_hours: default_timeout_hours(),
            check_interval_seconds: default_check_interval(),
            monitor_enabled: true,
        }
    }
}

fn default_timeout_hours() -> u64 {
    24
}

fn default_check_interval() -> u64 {
    300
}

fn default_true() -> bool {
    true
}
