//! Booking payment state derivation and ledger checks.

pub mod classifier;
pub mod ledger;
pub mod resolver;

pub use classifier::{PaymentInputs, classify, classify_at};
pub use ledger::{ItineraryLookup, PaymentLedger};
pub use resolver::PaymentStatusResolver;
