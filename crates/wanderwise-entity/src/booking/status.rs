//! Booking and payment status enumerations.
//!
//! Status columns are free text in the backing store. Parsing is lenient:
//! values outside the known set map to `Other` so that every row can still
//! be classified.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Requested, waiting for the guide.
    Pending,
    /// Accepted by the guide.
    Confirmed,
    /// Called off by either side.
    Cancelled,
    /// The tour took place.
    Completed,
    /// Anything the backing store holds that is not listed above.
    Other,
}

impl BookingStatus {
    /// Parse a stored status value.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "cancelled" | "canceled" => Self::Cancelled,
            "completed" => Self::Completed,
            _ => Self::Other,
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment status recorded on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing collected yet.
    Pending,
    /// Fully paid.
    Paid,
    /// Money returned to the traveler.
    Refunded,
    /// The last charge attempt failed.
    Failed,
    /// Missing or unrecognised.
    Other,
}

impl PaymentStatus {
    /// Parse a stored payment status value. `completed` counts as paid.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pending" | "unpaid" => Self::Pending,
            "paid" | "completed" => Self::Paid,
            "refunded" => Self::Refunded,
            "failed" => Self::Failed,
            _ => Self::Other,
        }
    }

    /// Parse an optional column.
    pub fn parse_opt(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or(Self::Other)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
            Self::Failed => "failed",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
