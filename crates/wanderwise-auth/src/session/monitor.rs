//! Periodic session expiry check.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::manager::SessionManager;

/// Logs the session out once its inactivity window closes.
///
/// The monitor lives exactly as long as its cancellation token: the
/// manager cancels it on logout and expiry, and the manager's shutdown
/// token cancels it with everything else.
#[derive(Debug)]
pub struct ExpiryMonitor {
    manager: SessionManager,
    interval: Duration,
}

impl ExpiryMonitor {
    /// Creates a monitor that checks every `interval`.
    pub fn new(manager: SessionManager, interval: Duration) -> Self {
        Self {
            manager,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    /// Run the monitor on the current runtime.
    pub fn spawn(self, token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(token))
    }

    /// Check every interval until cancelled or the session ends.
    ///
    /// The first check happens one full interval after start.
    pub async fn run(self, token: CancellationToken) {
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!(interval_secs = self.interval.as_secs(), "Expiry monitor started");

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Expiry monitor cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    if !self.manager.check_expiry().await {
                        debug!("Session no longer active, expiry monitor stopping");
                        break;
                    }
                }
            }
        }
    }
}
