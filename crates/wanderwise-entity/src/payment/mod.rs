//! Payment ledger entries and derived payment state.

pub mod model;
pub mod state;

pub use model::Payment;
pub use state::BookingPaymentState;
