//! # wanderwise-database
//!
//! PostgreSQL connection management and repositories for the tables the
//! session, activity and payment components read.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
