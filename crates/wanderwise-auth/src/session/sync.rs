//! Follows logouts made by other instances sharing the same store.

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use wanderwise_core::traits::KeyValueStore;
use wanderwise_kv::keys;

use super::manager::SessionManager;

/// Listener that clears the in-memory session when another handle signs out.
///
/// Changes made through the manager's own handle are ignored. Storage is
/// never written from here.
#[derive(Debug)]
pub struct SessionSync;

impl SessionSync {
    /// Subscribe to storage changes and start listening.
    ///
    /// The subscription is taken before this returns, so no later change is
    /// missed. The task stops on [`SessionManager::shutdown`].
    pub fn spawn(manager: SessionManager) -> JoinHandle<()> {
        let mut changes = manager.storage().subscribe();
        let origin = manager.storage().origin();
        let token = manager.shutdown_token();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    received = changes.recv() => match received {
                        Ok(change) => {
                            if change.origin == origin || !keys::is_logged_in_flag(&change.key) {
                                continue;
                            }
                            if change.value.as_deref() == Some("true") {
                                continue;
                            }
                            // Legacy keys are dropped on every save, so a removal alone
                            // does not mean the session ended.
                            match manager.storage().get(keys::LOGGED_IN).await {
                                Ok(Some(flag)) if flag == "true" => {
                                    debug!(key = %change.key, "Logged-in flag still set, ignoring");
                                }
                                Ok(_) => {
                                    debug!(key = %change.key, "Logged-in flag cleared elsewhere");
                                    manager.apply_remote_logout().await;
                                }
                                Err(e) => {
                                    warn!(error = %e, "Failed to read logged-in flag, re-checking session");
                                    manager.check_expiry().await;
                                }
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "Missed storage changes, re-reading session");
                            manager.check_expiry().await;
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
            debug!("Session sync stopped");
        })
    }
}
