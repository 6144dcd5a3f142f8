//! Authentication collaborator configuration.

use serde::{Deserialize, Serialize};

/// Which authenticator backs the session manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    /// Accounts stored in the `profiles` table.
    #[default]
    Database,
    /// Seeded in-process demo accounts.
    Mock,
}

impl std::fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthProvider::Database => write!(f, "database"),
            AuthProvider::Mock => write!(f, "mock"),
        }
    }
}

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Primary authenticator.
    #[serde(default)]
    pub provider: AuthProvider,
    /// Fall back to the demo accounts when the primary authenticator is
    /// unreachable. Intended for local development only.
    #[serde(default)]
    pub fallback_to_mock: bool,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: AuthProvider::default(),
            fallback_to_mock: false,
            password_min_length: default_password_min(),
        }
    }
}

fn default_password_min() -> usize {
    8
}
