//! Session manager: the single owner of the signed-in principal.
//!
//! Every write to the session, in memory or in storage, goes through this
//! type. Services read the session through [`SessionContext`] snapshots.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::{Mutex, RwLock, broadcast};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use wanderwise_core::config::{AuthConfig, SessionConfig};
use wanderwise_core::error::ErrorKind;
use wanderwise_core::events::{SessionEndReason, SessionEvent};
use wanderwise_core::policy::CallPolicy;
use wanderwise_entity::session::SessionRecord;
use wanderwise_entity::user::{Principal, ProfileUpdate, Registration, UserRole};
use wanderwise_kv::StorageHandle;

use crate::authenticator::Authenticator;
use crate::error::AuthError;
use crate::password::PasswordValidator;
use crate::rbac::{Permission, RbacEnforcer};

use super::context::SessionContext;
use super::monitor::ExpiryMonitor;
use super::store::SessionStore;

const EVENT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Default)]
struct SessionState {
    record: Option<SessionRecord>,
    initialized: bool,
}

/// Owns the session lifecycle: restore, login, logout, refresh and expiry.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<SessionStore>,
    authenticator: Arc<dyn Authenticator>,
    validator: Arc<PasswordValidator>,
    rbac: Arc<RbacEnforcer>,
    policy: CallPolicy,
    config: SessionConfig,
    timeout: Duration,
    state: Arc<RwLock<SessionState>>,
    /// Cancels the expiry monitor of the current session.
    monitor: Arc<Mutex<Option<CancellationToken>>>,
    /// Cancels everything the manager spawned.
    shutdown: CancellationToken,
    events: broadcast::Sender<SessionEvent>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("authenticator", &self.authenticator.name())
            .field("config", &self.config)
            .finish()
    }
}

impl SessionManager {
    /// Creates a session manager. Nothing is read until [`initialize`](Self::initialize).
    pub fn new(
        store: SessionStore,
        authenticator: Arc<dyn Authenticator>,
        session_config: SessionConfig,
        auth_config: &AuthConfig,
        policy: CallPolicy,
    ) -> Self {
        let timeout =
            Duration::from_std(session_config.timeout()).unwrap_or_else(|_| Duration::hours(24));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            store: Arc::new(store),
            authenticator,
            validator: Arc::new(PasswordValidator::new(auth_config)),
            rbac: Arc::new(RbacEnforcer::new()),
            policy,
            config: session_config,
            timeout,
            state: Arc::new(RwLock::new(SessionState::default())),
            monitor: Arc::new(Mutex::new(None)),
            shutdown: CancellationToken::new(),
            events,
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Restore the persisted session. Only the first call does anything.
    ///
    /// Restoring does not count as activity and never moves the stored
    /// timestamp. Storage failures are logged and leave the manager signed
    /// out.
    pub async fn initialize(&self) -> SessionContext {
        let mut state = self.state.write().await;
        if state.initialized {
            return snapshot(&state);
        }

        state.record = match self.store.restore(Utc::now(), self.timeout).await {
            Ok(outcome) => outcome.into_record(),
            Err(e) => {
                error!(error = %e, "Failed to read stored session");
                None
            }
        };
        state.initialized = true;

        let context = snapshot(&state);
        drop(state);

        if let Some(user_id) = context.user_id() {
            info!(user_id = %user_id, "Session restored");
            self.emit(SessionEvent::Restored { user_id });
            self.start_monitor().await;
        }
        context
    }

    /// Sign in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(vec![
                "Email and password are required".to_string(),
            ]));
        }

        let authenticator = &self.authenticator;
        let principal = self
            .policy
            .call("authenticator.login", move || {
                authenticator.login(email, password)
            })
            .await
            .map_err(|e| AuthError::from_collaborator("login", e))?;

        self.establish(principal).await
    }

    /// Create an account and sign in to it.
    ///
    /// Every field violation is reported before the authenticator is called.
    pub async fn register(&self, registration: &Registration) -> Result<Principal, AuthError> {
        let violations = self.validator.registration_violations(registration);
        if !violations.is_empty() {
            return Err(AuthError::Validation(violations));
        }

        let authenticator = &self.authenticator;
        let principal = self
            .policy
            .call("authenticator.register", move || {
                authenticator.register(registration)
            })
            .await
            .map_err(|e| AuthError::from_collaborator("register", e))?;

        self.establish(principal).await
    }

    async fn establish(&self, principal: Principal) -> Result<Principal, AuthError> {
        let record = SessionRecord::new(principal.clone(), Utc::now(), self.timeout);
        {
            let mut state = self.state.write().await;
            if let Err(e) = self.store.save(&record).await {
                error!(user_id = %principal.id, error = %e, "Failed to persist session");
                return Err(AuthError::Unavailable);
            }
            state.record = Some(record);
        }

        info!(
            user_id = %principal.id,
            role = %principal.role,
            authenticator = self.authenticator.name(),
            "Session started"
        );
        self.emit(SessionEvent::Started {
            user_id: principal.id,
        });
        self.start_monitor().await;
        Ok(principal)
    }

    /// Sign out and clear every session key, current and legacy.
    ///
    /// The authenticator is notified from a spawned task; a failed
    /// notification is logged and not retried.
    pub async fn logout(&self) {
        let user_id = self.state.read().await.record.as_ref().map(|r| r.user.id);

        if let Some(user_id) = user_id {
            let authenticator = Arc::clone(&self.authenticator);
            let timeout = self.policy.timeout;
            tokio::spawn(async move {
                match tokio::time::timeout(timeout, authenticator.logout(user_id)).await {
                    Ok(Ok(())) => debug!(user_id = %user_id, "Logout acknowledged"),
                    Ok(Err(e)) => {
                        warn!(user_id = %user_id, error = %e, "Logout notification failed")
                    }
                    Err(_) => warn!(user_id = %user_id, "Logout notification timed out"),
                }
            });
        }

        self.end_session(SessionEndReason::Logout, true).await;
    }

    async fn end_session(&self, reason: SessionEndReason, clear_storage: bool) -> Option<Uuid> {
        let user_id = {
            let mut state = self.state.write().await;
            let user_id = state.record.take().map(|r| r.user.id);
            if clear_storage {
                if let Err(e) = self.store.clear().await {
                    error!(error = %e, "Failed to clear stored session");
                }
            }
            user_id
        };

        self.stop_monitor().await;

        if let Some(id) = user_id {
            info!(user_id = %id, %reason, "Session ended");
        }
        self.emit(SessionEvent::Ended { user_id, reason });
        user_id
    }

    /// Drop the in-memory session after another instance signed out.
    ///
    /// Storage is left alone: the other instance already cleared it.
    pub(crate) async fn apply_remote_logout(&self) {
        if self.state.read().await.record.is_some() {
            self.end_session(SessionEndReason::RemoteLogout, false).await;
        }
    }

    /// Cancel the monitor and any other background task of this manager.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    // ── Account changes ────────────────────────────────────────

    /// Apply a partial profile change.
    ///
    /// Returns `true` only when the authenticator accepted the change and the
    /// merged principal was persisted; otherwise nothing changes.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> bool {
        let mut state = self.state.write().await;
        let Some(record) = state.record.as_ref() else {
            warn!("Profile update without a session");
            return false;
        };
        if update.is_empty() {
            return true;
        }

        let user_id = record.user.id;
        let authenticator = &self.authenticator;
        match self
            .policy
            .call("authenticator.update_profile", move || {
                authenticator.update_profile(user_id, update)
            })
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                warn!(user_id = %user_id, "Profile update was not applied");
                return false;
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Profile update failed");
                return false;
            }
        }

        let merged = update.merged_into(&record.user);
        if let Err(e) = self.store.save_user(&merged).await {
            error!(user_id = %user_id, error = %e, "Failed to persist updated profile");
            return false;
        }
        if let Some(record) = state.record.as_mut() {
            record.user = merged;
        }
        drop(state);

        self.emit(SessionEvent::ProfileUpdated { user_id });
        true
    }

    /// Change the signed-in principal's password.
    pub async fn update_password(&self, current: &str, new: &str) -> Result<(), AuthError> {
        let user_id = self
            .state
            .read()
            .await
            .record
            .as_ref()
            .map(|r| r.user.id)
            .ok_or(AuthError::NotLoggedIn)?;

        if !self.authenticator.supports_password_change() {
            return Err(AuthError::Unsupported(
                "Password changes are not available for this account".to_string(),
            ));
        }

        let mut violations = Vec::new();
        if current == new {
            violations.push("New password must be different from the current password".to_string());
        }
        violations.extend(self.validator.violations(new));
        if !violations.is_empty() {
            return Err(AuthError::Validation(violations));
        }

        let authenticator = &self.authenticator;
        self.policy
            .call("authenticator.update_password", move || {
                authenticator.update_password(user_id, current, new)
            })
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Authentication => AuthError::Validation(vec![e.message]),
                _ => AuthError::from_collaborator("update_password", e),
            })?;

        info!(user_id = %user_id, "Password updated");
        Ok(())
    }

    // ── Activity and expiry ────────────────────────────────────

    /// Explicitly extend the session. Does nothing while signed out.
    pub async fn refresh_session(&self) -> bool {
        self.touch(false).await
    }

    /// Record a user interaction.
    ///
    /// Ignored until [`initialize`](Self::initialize) has completed, so a
    /// restore can never be mistaken for activity.
    pub async fn record_activity(&self) -> bool {
        self.touch(true).await
    }

    async fn touch(&self, require_initialized: bool) -> bool {
        let mut state = self.state.write().await;
        if require_initialized && !state.initialized {
            return false;
        }
        let Some(user_id) = state.record.as_ref().map(|r| r.user.id) else {
            return false;
        };

        // Another instance may have refreshed the session since we last looked.
        let stored_activity = match self.store.load().await {
            Ok(Some(stored)) if stored.user.id == user_id => Some(stored.last_activity_ms),
            Ok(_) => {
                drop(state);
                info!(user_id = %user_id, "Stored session is gone");
                self.end_session(SessionEndReason::RemoteLogout, false).await;
                return false;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored session, using in-memory copy");
                None
            }
        };

        let now = Utc::now();
        let valid = match state.record.as_mut() {
            Some(record) => {
                if let Some(stored) = stored_activity {
                    record.last_activity_ms = record.last_activity_ms.max(stored);
                }
                record.is_valid_at(now)
            }
            None => return false,
        };
        if !valid {
            drop(state);
            self.end_session(SessionEndReason::Expired, true).await;
            return false;
        }

        if let Err(e) = self.store.touch(now).await {
            warn!(error = %e, "Failed to record session activity");
            return false;
        }
        if let Some(record) = state.record.as_mut() {
            record.last_activity_ms = now.timestamp_millis();
        }
        true
    }

    /// Check the stored session and log out if it is no longer valid.
    ///
    /// Returns whether the session is still alive. A timestamp written by
    /// another instance counts as activity.
    pub async fn check_expiry(&self) -> bool {
        let Some(in_memory) = self.state.read().await.record.clone() else {
            return false;
        };

        let record = match self.store.load().await {
            Ok(Some(stored)) if stored.user.id == in_memory.user.id => stored,
            Ok(_) => {
                info!(user_id = %in_memory.user.id, "Stored session is gone");
                self.end_session(SessionEndReason::RemoteLogout, false).await;
                return false;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored session, using in-memory copy");
                in_memory
            }
        };

        if record.is_valid_at(Utc::now()) {
            let mut state = self.state.write().await;
            if let Some(current) = state.record.as_mut() {
                current.last_activity_ms = current.last_activity_ms.max(record.last_activity_ms);
            }
            true
        } else {
            self.end_session(SessionEndReason::Expired, true).await;
            false
        }
    }

    async fn start_monitor(&self) {
        if !self.config.monitor_enabled {
            return;
        }
        let token = self.shutdown.child_token();
        if let Some(previous) = self.monitor.lock().await.replace(token.clone()) {
            previous.cancel();
        }
        ExpiryMonitor::new(self.clone(), self.config.check_interval()).spawn(token);
    }

    async fn stop_monitor(&self) {
        if let Some(token) = self.monitor.lock().await.take() {
            token.cancel();
        }
    }

    // ── Queries ────────────────────────────────────────────────

    /// Snapshot of the session for services.
    pub async fn context(&self) -> SessionContext {
        snapshot(&*self.state.read().await)
    }

    /// The signed-in principal.
    pub async fn current_user(&self) -> Option<Principal> {
        self.state
            .read()
            .await
            .record
            .as_ref()
            .map(|r| r.user.clone())
    }

    /// Whether a principal is signed in.
    pub async fn is_logged_in(&self) -> bool {
        self.state.read().await.record.is_some()
    }

    /// Whether the principal has exactly `role`.
    pub async fn is_role(&self, role: UserRole) -> bool {
        self.context().await.is_role(role)
    }

    /// Whether the principal's role is at least `role`.
    pub async fn is_min_role(&self, role: UserRole) -> bool {
        self.context().await.is_min_role(role)
    }

    /// Whether the principal holds `permission`. Admin holds all of them.
    pub async fn has_permission(&self, permission: Permission) -> bool {
        self.context().await.has_permission(&self.rbac, permission)
    }

    /// The RBAC policy used for permission checks.
    pub fn rbac(&self) -> &RbacEnforcer {
        &self.rbac
    }

    /// Receive session lifecycle events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub(crate) fn storage(&self) -> &StorageHandle {
        self.store.handle()
    }

    pub(crate) fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    fn emit(&self, event: SessionEvent) {
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }
}

fn snapshot(state: &SessionState) -> SessionContext {
    state
        .record
        .as_ref()
        .map(SessionContext::from_record)
        .unwrap_or_default()
}
