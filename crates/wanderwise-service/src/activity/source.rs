//! Where activity rows come from.

use async_trait::async_trait;
use uuid::Uuid;

use wanderwise_core::result::AppResult;
use wanderwise_database::repositories::{
    BookingRepository, MessageRepository, TourRequestRepository,
};
use wanderwise_entity::booking::Booking;
use wanderwise_entity::message::Message;
use wanderwise_entity::tour_request::TourRequest;

/// The three collections the feed is built from.
///
/// Each method returns at most `limit` rows (all rows for `None`), newest
/// first by the column the feed uses as the item timestamp.
#[async_trait]
pub trait ActivitySource: Send + Sync + std::fmt::Debug {
    /// Bookings made by the user, by `updated_at`.
    async fn bookings(&self, user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<Booking>>;

    /// Messages sent by the user, by `created_at`.
    async fn messages(&self, user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<Message>>;

    /// Tour requests made by the user, by `created_at`.
    async fn tour_requests(&self, user_id: Uuid, limit: Option<i64>)
    -> AppResult<Vec<TourRequest>>;
}

/// Activity source backed by the database repositories.
#[derive(Debug, Clone)]
pub struct RepositoryActivitySource {
    bookings: BookingRepository,
    messages: MessageRepository,
    tour_requests: TourRequestRepository,
}

impl RepositoryActivitySource {
    /// Creates a source over the given repositories.
    pub fn new(
        bookings: BookingRepository,
        messages: MessageRepository,
        tour_requests: TourRequestRepository,
    ) -> Self {
        Self {
            bookings,
            messages,
            tour_requests,
        }
    }
}

#[async_trait]
impl ActivitySource for RepositoryActivitySource {
    async fn bookings(&self, user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<Booking>> {
        self.bookings.find_recent_by_traveler(user_id, limit).await
    }

    async fn messages(&self, user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<Message>> {
        self.messages.find_recent_by_sender(user_id, limit).await
    }

    async fn tour_requests(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<TourRequest>> {
        self.tour_requests
            .find_recent_by_traveler(user_id, limit)
            .await
    }
}
