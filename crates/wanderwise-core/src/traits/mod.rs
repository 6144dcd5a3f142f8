//! Core traits defined in `wanderwise-core` and implemented by other crates.

pub mod kv;

pub use kv::KeyValueStore;
