//! Tour request repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use wanderwise_core::error::{AppError, ErrorKind};
use wanderwise_core::result::AppResult;
use wanderwise_entity::tour_request::TourRequest;

/// Repository for the `tour_requests` table.
#[derive(Debug, Clone)]
pub struct TourRequestRepository {
    pool: PgPool,
}

impl TourRequestRepository {
    /// Create a new tour request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A traveler's tour requests, newest first. `None` returns every row.
    pub async fn find_recent_by_traveler(
        &self,
        traveler_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<TourRequest>> {
        sqlx::query_as::<_, TourRequest>(
            "SELECT * FROM tour_requests WHERE traveler_id = $1 \
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(traveler_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list tour requests", e)
        })
    }
}
