//! Payment row model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row of the `payments` ledger.
///
/// A payment settles either a tour booking or an itinerary booking, so
/// exactly one of the two foreign keys is expected to be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub booking_id: Option<Uuid>,
    pub itinerary_booking_id: Option<Uuid>,
    pub amount: f64,
    pub currency: String,
    /// `pending`, `completed`, `failed` or `refunded`.
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Ledger status that settles a booking.
    pub const COMPLETED: &'static str = "completed";

    /// Whether this entry settles its booking.
    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case(Self::COMPLETED)
    }
}
