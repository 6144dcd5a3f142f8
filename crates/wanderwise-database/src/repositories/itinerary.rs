//! Itinerary booking repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use wanderwise_core::error::{AppError, ErrorKind};
use wanderwise_core::result::AppResult;
use wanderwise_entity::itinerary::ItineraryBooking;

/// Repository for the `itinerary_bookings` table.
#[derive(Debug, Clone)]
pub struct ItineraryBookingRepository {
    pool: PgPool,
}

impl ItineraryBookingRepository {
    /// Create a new itinerary booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an itinerary booking by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ItineraryBooking>> {
        sqlx::query_as::<_, ItineraryBooking>("SELECT * FROM itinerary_bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find itinerary booking", e)
            })
    }
}
