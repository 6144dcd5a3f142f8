//! # wanderwise-core
//!
//! Core crate for WanderWise. Contains configuration schemas, the
//! key-value store trait, session domain events, the collaborator call
//! policy, and the unified error system.
//!
//! This crate has **no** internal dependencies on other WanderWise crates.

pub mod config;
pub mod error;
pub mod events;
pub mod policy;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use policy::CallPolicy;
pub use result::AppResult;
