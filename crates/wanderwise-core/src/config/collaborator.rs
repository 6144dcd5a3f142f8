//! Timeout and retry settings for calls to external collaborators.

use serde::{Deserialize, Serialize};

/// Collaborator call policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorConfig {
    /// Per-attempt timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Extra attempts after a transient failure.
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            retries: default_retries(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    1
}
