//! Activity aggregation service.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use wanderwise_auth::SessionContext;
use wanderwise_core::config::ActivityConfig;
use wanderwise_core::error::AppError;
use wanderwise_core::policy::CallPolicy;
use wanderwise_core::result::AppResult;
use wanderwise_entity::activity::ActivityItem;

use super::mapper;
use super::source::ActivitySource;

/// Merges bookings, messages and tour requests into one recency-ordered feed.
#[derive(Debug, Clone)]
pub struct ActivityAggregator {
    /// Row source.
    source: Arc<dyn ActivitySource>,
    /// Feed settings.
    config: ActivityConfig,
    /// Timeout and retry policy for each source fetch.
    policy: CallPolicy,
}

impl ActivityAggregator {
    /// Creates a new aggregator.
    pub fn new(source: Arc<dyn ActivitySource>, config: ActivityConfig, policy: CallPolicy) -> Self {
        Self {
            source,
            config,
            policy,
        }
    }

    /// The most recent `limit` activities of a user.
    ///
    /// Every source is asked for at least `min_per_source` rows so that the
    /// truncated result is globally recent rather than recent per source.
    pub async fn recent_activities(&self, user_id: Uuid, limit: usize) -> Vec<ActivityItem> {
        if limit == 0 {
            return Vec::new();
        }

        let per_source = limit.max(self.config.min_per_source);
        let mut items = self
            .collect(user_id, Some(i64::try_from(per_source).unwrap_or(i64::MAX)))
            .await;
        items.truncate(limit);
        items
    }

    /// Every activity of a user, newest first.
    pub async fn all_activities(&self, user_id: Uuid) -> Vec<ActivityItem> {
        self.collect(user_id, None).await
    }

    /// Recent activities of the signed-in principal.
    pub async fn recent_for(
        &self,
        ctx: &SessionContext,
        limit: usize,
    ) -> AppResult<Vec<ActivityItem>> {
        let principal = ctx.require_principal()?;
        Ok(self.recent_activities(principal.id, limit).await)
    }

    /// Every activity of the signed-in principal.
    pub async fn all_for(&self, ctx: &SessionContext) -> AppResult<Vec<ActivityItem>> {
        let principal = ctx.require_principal()?;
        Ok(self.all_activities(principal.id).await)
    }

    async fn collect(&self, user_id: Uuid, per_source: Option<i64>) -> Vec<ActivityItem> {
        let source = self.source.as_ref();

        let (bookings, messages, requests) = tokio::join!(
            self.fetch("bookings", user_id, move || source.bookings(user_id, per_source)),
            self.fetch("messages", user_id, move || source.messages(user_id, per_source)),
            self.fetch("tour_requests", user_id, move || {
                source.tour_requests(user_id, per_source)
            }),
        );

        let preview_length = self.config.message_preview_length;
        let mut items: Vec<ActivityItem> =
            Vec::with_capacity(bookings.len() + messages.len() + requests.len());
        items.extend(bookings.iter().map(mapper::booking_activity));
        items.extend(
            messages
                .iter()
                .map(|message| mapper::message_activity(message, preview_length)),
        );
        items.extend(requests.iter().map(mapper::tour_request_activity));

        // Stable, so equal timestamps keep source order.
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        debug!(
            user_id = %user_id,
            count = items.len(),
            "Collected activities"
        );
        items
    }

    /// Runs one source fetch. A failed source contributes nothing.
    async fn fetch<T, F, Fut>(&self, source: &'static str, user_id: Uuid, call: F) -> Vec<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Vec<T>, AppError>>,
    {
        match self.policy.call(source, call).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(
                    source,
                    user_id = %user_id,
                    error = %e,
                    "Activity source failed, skipping it"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use super::*;
    use wanderwise_entity::booking::Booking;
    use wanderwise_entity::message::Message;
    use wanderwise_entity::tour_request::TourRequest;

    /// Serves a fixed set of bookings and records the requested limit.
    #[derive(Debug, Default)]
    struct BookingsOnly {
        rows: Vec<Booking>,
        requested: AtomicI64,
    }

    #[async_trait]
    impl ActivitySource for BookingsOnly {
        async fn bookings(&self, _user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<Booking>> {
            self.requested.store(limit.unwrap_or(-1), Ordering::SeqCst);
            let take = limit.map_or(self.rows.len(), |l| l as usize);
            Ok(self.rows.iter().take(take).cloned().collect())
        }

        async fn messages(&self, _user_id: Uuid, _limit: Option<i64>) -> AppResult<Vec<Message>> {
            Err(AppError::validation("messages are broken"))
        }

        async fn tour_requests(
            &self,
            _user_id: Uuid,
            _limit: Option<i64>,
        ) -> AppResult<Vec<TourRequest>> {
            Ok(Vec::new())
        }
    }

    fn booking(hour: u32) -> Booking {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap();
        Booking {
            id: Uuid::new_v4(),
            traveler_id: Uuid::nil(),
            tour_id: None,
            status: "pending".to_string(),
            payment_status: None,
            total_amount: None,
            participants: 1,
            booking_date: None,
            payment_due_date: None,
            created_at: at,
            updated_at: at,
            tour_title: None,
            tour_location: None,
        }
    }

    fn aggregator(source: Arc<BookingsOnly>) -> ActivityAggregator {
        ActivityAggregator::new(
            source,
            ActivityConfig::default(),
            CallPolicy::new(Duration::from_secs(1), 0),
        )
    }

    #[tokio::test]
    async fn test_over_fetches_small_limits() {
        let source = Arc::new(BookingsOnly {
            rows: vec![booking(12), booking(11), booking(10), booking(9)],
            ..BookingsOnly::default()
        });
        let items = aggregator(Arc::clone(&source))
            .recent_activities(Uuid::nil(), 1)
            .await;

        assert_eq!(items.len(), 1);
        assert_eq!(source.requested.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failed_source_degrades_to_empty() {
        let source = Arc::new(BookingsOnly {
            rows: vec![booking(8), booking(14)],
            ..BookingsOnly::default()
        });
        let items = aggregator(source).all_activities(Uuid::nil()).await;

        assert_eq!(items.len(), 2);
        assert!(items[0].timestamp > items[1].timestamp);
        assert_eq!(items[0].timestamp.format("%H").to_string(), "14");
    }

    #[tokio::test]
    async fn test_zero_limit_is_empty() {
        let source = Arc::new(BookingsOnly {
            rows: vec![booking(8)],
            ..BookingsOnly::default()
        });
        assert!(
            aggregator(source)
                .recent_activities(Uuid::nil(), 0)
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_anonymous_context_is_rejected() {
        let source = Arc::new(BookingsOnly::default());
        let result = aggregator(source)
            .recent_for(&SessionContext::anonymous(), 3)
            .await;
        assert!(result.is_err());
    }
}
