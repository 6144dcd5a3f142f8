//! Payments ledger repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use wanderwise_core::error::{AppError, ErrorKind};
use wanderwise_core::result::AppResult;
use wanderwise_entity::payment::Payment;

/// Repository for the `payments` ledger.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Create a new payment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether a completed payment exists for a booking or itinerary booking id.
    pub async fn has_completed_payment(&self, booking_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                SELECT 1 FROM payments \
                WHERE (booking_id = $1 OR itinerary_booking_id = $1) AND status = $2 \
             )",
        )
        .bind(booking_id)
        .bind(Payment::COMPLETED)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query payments", e))
    }
}
