//! Coarse display state of a booking's payment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The single display state derived for a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingPaymentState {
    Cancelled,
    Completed,
    Paid,
    /// The payment deadline passed without payment.
    Expired,
    /// Confirmed by the guide with a known price, not yet paid.
    AwaitingPayment,
    Pending,
}

impl BookingPaymentState {
    /// Return the state as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::Paid => "paid",
            Self::Expired => "expired",
            Self::AwaitingPayment => "awaiting_payment",
            Self::Pending => "pending",
        }
    }

    /// Whether the booking reached a final state that payment cannot change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }
}

impl fmt::Display for BookingPaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
