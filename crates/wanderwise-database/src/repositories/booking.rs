//! Booking repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use wanderwise_core::error::{AppError, ErrorKind};
use wanderwise_core::result::AppResult;
use wanderwise_entity::booking::Booking;

const SELECT_WITH_TOUR: &str = "SELECT b.id, b.traveler_id, b.tour_id, b.status, b.payment_status, \
            b.total_amount, b.participants, b.booking_date, b.payment_due_date, \
            b.created_at, b.updated_at, \
            t.title AS tour_title, t.location AS tour_location \
     FROM bookings b \
     LEFT JOIN tours t ON t.id = b.tour_id";

/// Repository for the `bookings` table.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>(&format!("{SELECT_WITH_TOUR} WHERE b.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    /// A traveler's bookings, most recently updated first.
    ///
    /// `None` returns every row.
    pub async fn find_recent_by_traveler(
        &self,
        traveler_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(&format!(
            "{SELECT_WITH_TOUR} WHERE b.traveler_id = $1 ORDER BY b.updated_at DESC LIMIT $2"
        ))
        .bind(traveler_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))
    }
}
