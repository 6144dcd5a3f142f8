//! Client-side session lifecycle.
//!
//! - [`SessionStore`] reads and writes the session keys
//! - [`SessionManager`] owns the signed-in principal and every write to it
//! - [`ExpiryMonitor`] logs out once the inactivity window closes
//! - [`SessionSync`] follows logouts made by other instances

pub mod context;
pub mod manager;
pub mod monitor;
pub mod store;
pub mod sync;

pub use context::SessionContext;
pub use manager::SessionManager;
pub use monitor::ExpiryMonitor;
pub use store::{RestoreOutcome, SessionStore};
pub use sync::SessionSync;
