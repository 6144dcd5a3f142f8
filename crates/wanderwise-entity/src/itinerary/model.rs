//! Itinerary booking row model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row of the `itinerary_bookings` table.
///
/// An itinerary booking is created when a guide answers a tour request with
/// a priced itinerary. The guide may set a confirmed total that replaces the
/// quoted amount, and a due date after which the offer lapses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ItineraryBooking {
    pub id: Uuid,
    pub traveler_id: Uuid,
    pub guide_id: Option<Uuid>,
    pub tour_request_id: Option<Uuid>,
    pub status: String,
    pub payment_status: Option<String>,
    pub payment_due_date: Option<DateTime<Utc>>,
    pub confirmed_total: Option<f64>,
    pub amount: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItineraryBooking {
    /// The amount the traveler owes: the confirmed total when set, else the quote.
    pub fn effective_amount(&self) -> Option<f64> {
        self.confirmed_total.or(self.amount)
    }
}
