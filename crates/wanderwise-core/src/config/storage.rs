//! Persistent key-value store configuration.

use serde::{Deserialize, Serialize};

/// Key-value backend used for session persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageProvider {
    /// JSON file on disk, survives process restarts.
    #[default]
    File,
    /// In-process store, lost on exit.
    Memory,
}

/// Top-level key-value store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend selection.
    #[serde(default)]
    pub provider: StorageProvider,
    /// Path of the JSON file used by the `file` provider.
    #[serde(default = "default_path")]
    pub path: String,
    /// In-memory backend settings.
    #[serde(default)]
    pub memory: MemoryStoreConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProvider::default(),
            path: default_path(),
            memory: MemoryStoreConfig::default(),
        }
    }
}

/// In-memory backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStoreConfig {
    /// Maximum number of entries held.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
        }
    }
}

fn default_path() -> String {
    "data/session.json".to_string()
}

fn default_max_capacity() -> u64 {
    1024
}
