//! Message repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use wanderwise_core::error::{AppError, ErrorKind};
use wanderwise_core::result::AppResult;
use wanderwise_entity::message::Message;

/// Repository for the `messages` table.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Messages sent by a user, newest first, with the recipient's names.
    ///
    /// `None` returns every row.
    pub async fn find_recent_by_sender(
        &self,
        sender_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            "SELECT m.id, m.sender_id, m.recipient_id, m.content, m.created_at, \
                    p.first_name AS recipient_first_name, \
                    p.last_name AS recipient_last_name, \
                    p.username AS recipient_username \
             FROM messages m \
             LEFT JOIN profiles p ON p.id = m.recipient_id \
             WHERE m.sender_id = $1 \
             ORDER BY m.created_at DESC \
             LIMIT $2",
        )
        .bind(sender_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))
    }
}
