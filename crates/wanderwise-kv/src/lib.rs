//! # wanderwise-kv
//!
//! Persistent key-value store providers used to keep the session across
//! process restarts:
//!
//! - **file**: a JSON document on disk, rewritten atomically on each change
//! - **memory**: an in-process store using [moka](https://crates.io/crates/moka)
//!
//! [`KvStoreManager`] selects the provider from configuration and hands out
//! [`StorageHandle`]s. Every write made through a handle is broadcast as a
//! [`StorageChange`], which is how one session manager learns that another
//! one signed out.

pub mod change;
pub mod file;
pub mod keys;
pub mod memory;
pub mod provider;

pub use change::StorageChange;
pub use provider::{KvStoreManager, StorageHandle};
