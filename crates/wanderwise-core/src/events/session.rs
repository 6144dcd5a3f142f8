//! Session lifecycle events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEndReason {
    /// The principal logged out explicitly.
    Logout,
    /// The inactivity timeout elapsed.
    Expired,
    /// Another instance sharing the same store logged out.
    RemoteLogout,
}

impl std::fmt::Display for SessionEndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logout => write!(f, "logout"),
            Self::Expired => write!(f, "expired"),
            Self::RemoteLogout => write!(f, "remote_logout"),
        }
    }
}

/// Events related to the local session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A principal logged in or registered.
    Started {
        /// The principal's ID.
        user_id: Uuid,
    },
    /// A persisted session was restored on startup.
    Restored {
        /// The principal's ID.
        user_id: Uuid,
    },
    /// The principal's profile changed.
    ProfileUpdated {
        /// The principal's ID.
        user_id: Uuid,
    },
    /// The session ended.
    Ended {
        /// The principal's ID, when one was loaded.
        user_id: Option<Uuid>,
        /// Why it ended.
        reason: SessionEndReason,
    },
}
