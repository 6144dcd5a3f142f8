//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every section falls back to its defaults when absent.

pub mod activity;
pub mod auth;
pub mod collaborator;
pub mod database;
pub mod logging;
pub mod session;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::activity::ActivityConfig;
pub use self::auth::{AuthConfig, AuthProvider};
pub use self::collaborator::CollaboratorConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::session::SessionConfig;
pub use self::storage::{MemoryStoreConfig, StorageConfig, StorageProvider};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backing data store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Persistent key-value store settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Authentication collaborator settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session lifetime settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Activity feed settings.
    #[serde(default)]
    pub activity: ActivityConfig,
    /// Timeout and retry policy for collaborator calls.
    #[serde(default)]
    pub collaborator: CollaboratorConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional. Environment variables prefixed with
    /// `WANDERWISE__` override file values (`WANDERWISE__SESSION__TIMEOUT_HOURS=1`).
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("WANDERWISE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
