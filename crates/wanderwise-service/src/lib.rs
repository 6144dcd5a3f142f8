//! # wanderwise-service
//!
//! Services that consume the session identity:
//!
//! - `activity` merges bookings, messages and tour requests into one feed
//! - `payment` classifies bookings and confirms payments against the ledger
//!
//! Services follow constructor injection; collaborators are passed in as
//! trait objects so they can be replaced in tests.

pub mod activity;
pub mod payment;

pub use activity::{ActivityAggregator, ActivitySource, RepositoryActivitySource};
pub use payment::{
    ItineraryLookup, PaymentInputs, PaymentLedger, PaymentStatusResolver, classify, classify_at,
};
pub use wanderwise_auth::SessionContext;
