//! Seams to the payments ledger and the itinerary bookings table.

use async_trait::async_trait;
use uuid::Uuid;

use wanderwise_core::result::AppResult;
use wanderwise_database::repositories::{ItineraryBookingRepository, PaymentRepository};
use wanderwise_entity::itinerary::ItineraryBooking;

/// The payments ledger.
#[async_trait]
pub trait PaymentLedger: Send + Sync + std::fmt::Debug {
    /// Whether a `completed` payment exists for the booking or itinerary
    /// booking with this id.
    async fn has_completed_payment(&self, booking_id: Uuid) -> AppResult<bool>;
}

#[async_trait]
impl PaymentLedger for PaymentRepository {
    async fn has_completed_payment(&self, booking_id: Uuid) -> AppResult<bool> {
        PaymentRepository::has_completed_payment(self, booking_id).await
    }
}

/// Loads itinerary bookings by id.
#[async_trait]
pub trait ItineraryLookup: Send + Sync + std::fmt::Debug {
    async fn itinerary_booking(&self, id: Uuid) -> AppResult<Option<ItineraryBooking>>;
}

#[async_trait]
impl ItineraryLookup for ItineraryBookingRepository {
    async fn itinerary_booking(&self, id: Uuid) -> AppResult<Option<ItineraryBooking>> {
        self.find_by_id(id).await
    }
}
