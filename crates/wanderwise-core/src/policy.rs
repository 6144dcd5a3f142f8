//! Timeout and retry policy applied to every collaborator call.
//!
//! The backing store, the authenticator and the payments ledger are all
//! remote. A call that hangs would otherwise stall the caller forever, so
//! each attempt is bounded by a timeout and transient failures get a
//! bounded number of retries.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::config::CollaboratorConfig;
use crate::error::AppError;
use crate::result::AppResult;

/// Timeout + retry policy for collaborator calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPolicy {
    /// Per-attempt timeout.
    pub timeout: Duration,
    /// Extra attempts after a transient failure.
    pub retries: u32,
}

impl CallPolicy {
    /// Creates a policy.
    pub fn new(timeout: Duration, retries: u32) -> Self {
        Self { timeout, retries }
    }

    /// Builds the policy from configuration.
    pub fn from_config(config: &CollaboratorConfig) -> Self {
        Self::new(Duration::from_secs(config.timeout_seconds), config.retries)
    }

    /// Runs `call`, retrying transient failures up to `retries` times.
    ///
    /// Non-transient errors (bad credentials, validation) are returned on
    /// the first attempt.
    pub async fn call<T, F, Fut>(&self, operation: &str, mut call: F) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let mut attempt = 0u32;
        loop {
            let result = match tokio::time::timeout(self.timeout, call()).await {
                Ok(result) => result,
                Err(_) => Err(AppError::timeout(format!(
                    "{operation} timed out after {}ms",
                    self.timeout.as_millis()
                ))),
            };

            match result {
                Ok(value) => return Ok(value),
                Err(e) if e.kind.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        operation,
                        attempt,
                        error = %e,
                        "Collaborator call failed, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self::from_config(&CollaboratorConfig::default())
    }
}
