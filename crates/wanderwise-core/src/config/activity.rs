//! Activity feed configuration.

use serde::{Deserialize, Serialize};

/// Activity feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    /// Number of items returned by the recent feed when no limit is given.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Minimum rows fetched from each source before the global merge.
    #[serde(default = "default_min_per_source")]
    pub min_per_source: usize,
    /// Maximum characters of a message body shown in its activity.
    #[serde(default = "default_preview_length")]
    pub message_preview_length: usize,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            min_per_source: default_min_per_source(),
            message_preview_length: default_preview_length(),
        }
    }
}

fn default_limit() -> usize {
    3
}

fn default_min_per_source() -> usize {
    3
}

fn default_preview_length() -> usize {
    50
}
