//! Key names used to persist the session.
//!
//! Keeping every key here makes it easy to find every key the session
//! touches, including the legacy ones that are only read for migration.

/// Serialized principal.
pub const USER: &str = "wanderwise:user";

/// `"true"` while a principal is signed in.
pub const LOGGED_IN: &str = "wanderwise:logged_in";

/// Last activity, epoch milliseconds.
pub const SESSION_TIMESTAMP: &str = "wanderwise:session_timestamp";

/// Session timeout, milliseconds.
pub const SESSION_TIMEOUT: &str = "wanderwise:session_timeout";

/// Serialized principal written by older releases.
pub const LEGACY_USER: &str = "user";

/// Logged-in flag written by older releases.
pub const LEGACY_LOGGED_IN: &str = "isLoggedIn";

/// Current-scheme session keys.
pub const CURRENT: [&str; 4] = [USER, LOGGED_IN, SESSION_TIMESTAMP, SESSION_TIMEOUT];

/// Legacy-scheme session keys.
pub const LEGACY: [&str; 2] = [LEGACY_USER, LEGACY_LOGGED_IN];

/// Every key cleared on logout.
pub fn all_session_keys() -> impl Iterator<Item = &'static str> {
    CURRENT.into_iter().chain(LEGACY)
}

/// Whether a key carries the logged-in flag under either scheme.
pub fn is_logged_in_flag(key: &str) -> bool {
    key == LOGGED_IN || key == LEGACY_LOGGED_IN
}
