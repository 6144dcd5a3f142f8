//! Booking row model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{BookingStatus, PaymentStatus};

/// A row of the `bookings` table joined with its tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// The traveler who made the booking.
    pub traveler_id: Uuid,
    /// The booked tour.
    pub tour_id: Option<Uuid>,
    /// Raw booking status.
    pub status: String,
    /// Raw payment status.
    pub payment_status: Option<String>,
    /// Total price.
    pub total_amount: Option<f64>,
    /// Number of participants.
    pub participants: i32,
    /// Date of the tour.
    pub booking_date: Option<NaiveDate>,
    /// Payment deadline, when the guide set one.
    pub payment_due_date: Option<DateTime<Utc>>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last changed.
    pub updated_at: DateTime<Utc>,
    /// Joined `tours.title`.
    pub tour_title: Option<String>,
    /// Joined `tours.location`.
    pub tour_location: Option<String>,
}

impl Booking {
    /// Parsed booking status.
    pub fn booking_status(&self) -> BookingStatus {
        BookingStatus::parse(&self.status)
    }

    /// Parsed payment status.
    pub fn payment_state(&self) -> PaymentStatus {
        PaymentStatus::parse_opt(self.payment_status.as_deref())
    }
}
