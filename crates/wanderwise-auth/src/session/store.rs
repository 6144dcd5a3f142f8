//! Persistence of the session in the key-value store.
//!
//! Session state is spread over four keys so that other instances can
//! watch the logged-in flag on its own. Older releases wrote only a user
//! and a flag under unprefixed keys; those are migrated on first read.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use wanderwise_core::result::AppResult;
use wanderwise_core::traits::KeyValueStore;
use wanderwise_entity::session::SessionRecord;
use wanderwise_entity::user::Principal;
use wanderwise_kv::{StorageHandle, keys};

const TRUE: &str = "true";

/// What [`SessionStore::restore`] found in storage.
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    /// No session was stored.
    Empty,
    /// A valid session was restored untouched.
    Restored(SessionRecord),
    /// A session without a timestamp was found and stamped.
    Stamped(SessionRecord),
    /// A legacy session was copied to the current keys.
    Migrated(SessionRecord),
    /// The stored session had expired and was cleared.
    Expired,
    /// The stored principal could not be parsed and storage was cleared.
    Corrupt,
}

impl RestoreOutcome {
    /// The live record, when the outcome left one.
    pub fn into_record(self) -> Option<SessionRecord> {
        match self {
            Self::Restored(r) | Self::Stamped(r) | Self::Migrated(r) => Some(r),
            Self::Empty | Self::Expired | Self::Corrupt => None,
        }
    }
}

/// Reads and writes the session keys through a storage handle.
#[derive(Debug, Clone)]
pub struct SessionStore {
    kv: StorageHandle,
}

impl SessionStore {
    /// Creates a store over a storage handle.
    pub fn new(kv: StorageHandle) -> Self {
        Self { kv }
    }

    /// The underlying handle.
    pub fn handle(&self) -> &StorageHandle {
        &self.kv
    }

    /// Load whatever session storage holds, migrating or clearing as needed.
    ///
    /// A valid stored timestamp is never rewritten here: restoring is not
    /// activity.
    pub async fn restore(
        &self,
        now: DateTime<Utc>,
        default_timeout: Duration,
    ) -> AppResult<RestoreOutcome> {
        let user = self.kv.get(keys::USER).await?;
        let logged_in = self.kv.get(keys::LOGGED_IN).await?;

        let Some(user_json) = user.filter(|_| logged_in.as_deref() == Some(TRUE)) else {
            return self.migrate_legacy(now, default_timeout).await;
        };

        let Some(user) = self.parse_principal(&user_json).await? else {
            return Ok(RestoreOutcome::Corrupt);
        };

        let timestamp = parse_ms(self.kv.get(keys::SESSION_TIMESTAMP).await?);
        let timeout = parse_ms(self.kv.get(keys::SESSION_TIMEOUT).await?);

        let Some(last_activity_ms) = timestamp else {
            let timeout = timeout.map(Duration::milliseconds).unwrap_or(default_timeout);
            let record = SessionRecord::new(user, now, timeout);
            self.write_timing(&record).await?;
            debug!(user_id = %record.user.id, "Stamped session without timestamp");
            return Ok(RestoreOutcome::Stamped(record));
        };

        let timeout_ms = match timeout {
            Some(ms) => ms,
            None => {
                let ms = default_timeout.num_milliseconds();
                self.kv.set(keys::SESSION_TIMEOUT, &ms.to_string()).await?;
                ms
            }
        };

        let record = SessionRecord {
            user,
            is_logged_in: true,
            last_activity_ms,
            timeout_ms,
        };

        if record.is_valid_at(now) {
            Ok(RestoreOutcome::Restored(record))
        } else {
            info!(user_id = %record.user.id, "Stored session expired, clearing");
            self.clear().await?;
            Ok(RestoreOutcome::Expired)
        }
    }

    async fn migrate_legacy(
        &self,
        now: DateTime<Utc>,
        default_timeout: Duration,
    ) -> AppResult<RestoreOutcome> {
        let legacy_user = self.kv.get(keys::LEGACY_USER).await?;
        let legacy_flag = self.kv.get(keys::LEGACY_LOGGED_IN).await?;

        match (legacy_user, legacy_flag.as_deref()) {
            (Some(user_json), Some(TRUE)) => {
                let Some(user) = self.parse_principal(&user_json).await? else {
                    return Ok(RestoreOutcome::Corrupt);
                };
                let record = SessionRecord::new(user, now, default_timeout);
                self.save(&record).await?;
                info!(user_id = %record.user.id, "Migrated legacy session");
                Ok(RestoreOutcome::Migrated(record))
            }
            (None, None) => {
                self.clear_current_leftovers().await?;
                Ok(RestoreOutcome::Empty)
            }
            _ => {
                debug!("Discarding incomplete legacy session");
                self.clear().await?;
                Ok(RestoreOutcome::Empty)
            }
        }
    }

    async fn parse_principal(&self, json: &str) -> AppResult<Option<Principal>> {
        match serde_json::from_str(json) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "Stored session user is corrupt, clearing");
                self.clear().await?;
                Ok(None)
            }
        }
    }

    /// Remove current keys left behind by a half-written or logged-out session.
    async fn clear_current_leftovers(&self) -> AppResult<()> {
        for key in keys::CURRENT {
            if self.kv.get(key).await?.is_some() {
                self.kv.remove(key).await?;
            }
        }
        Ok(())
    }

    /// Read the current session without side effects.
    ///
    /// Missing, logged-out or unparseable sessions read as `None`.
    pub async fn load(&self) -> AppResult<Option<SessionRecord>> {
        if self.kv.get(keys::LOGGED_IN).await?.as_deref() != Some(TRUE) {
            return Ok(None);
        }
        let Some(user_json) = self.kv.get(keys::USER).await? else {
            return Ok(None);
        };
        let Ok(user) = serde_json::from_str::<Principal>(&user_json) else {
            return Ok(None);
        };
        let timestamp = parse_ms(self.kv.get(keys::SESSION_TIMESTAMP).await?);
        let timeout = parse_ms(self.kv.get(keys::SESSION_TIMEOUT).await?);

        Ok(match (timestamp, timeout) {
            (Some(last_activity_ms), Some(timeout_ms)) => Some(SessionRecord {
                user,
                is_logged_in: true,
                last_activity_ms,
                timeout_ms,
            }),
            _ => None,
        })
    }

    /// Persist a full session and drop any legacy keys.
    ///
    /// The logged-in flag is written last so watchers never see it set
    /// before the principal.
    pub async fn save(&self, record: &SessionRecord) -> AppResult<()> {
        self.kv.set_json(keys::USER, &record.user).await?;
        self.write_timing(record).await?;
        self.kv.set(keys::LOGGED_IN, TRUE).await?;
        for key in keys::LEGACY {
            if self.kv.get(key).await?.is_some() {
                self.kv.remove(key).await?;
            }
        }
        Ok(())
    }

    /// Persist a changed principal.
    pub async fn save_user(&self, user: &Principal) -> AppResult<()> {
        self.kv.set_json(keys::USER, user).await
    }

    /// Record activity at `now`.
    pub async fn touch(&self, now: DateTime<Utc>) -> AppResult<()> {
        self.kv
            .set(keys::SESSION_TIMESTAMP, &now.timestamp_millis().to_string())
            .await
    }

    /// Stored last-activity timestamp in epoch milliseconds.
    pub async fn timestamp(&self) -> AppResult<Option<i64>> {
        Ok(parse_ms(self.kv.get(keys::SESSION_TIMESTAMP).await?))
    }

    async fn write_timing(&self, record: &SessionRecord) -> AppResult<()> {
        self.kv
            .set(keys::SESSION_TIMESTAMP, &record.last_activity_ms.to_string())
            .await?;
        self.kv
            .set(keys::SESSION_TIMEOUT, &record.timeout_ms.to_string())
            .await
    }

    /// Remove every session key, current and legacy.
    ///
    /// All keys are attempted; the first failure is returned.
    pub async fn clear(&self) -> AppResult<()> {
        let mut first_error = None;
        for key in keys::all_session_keys() {
            if let Err(e) = self.kv.remove(key).await {
                warn!(key, error = %e, "Failed to remove session key");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn parse_ms(value: Option<String>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}
