//! JSON-file key-value provider.

pub mod store;

pub use store::FileKvStore;
