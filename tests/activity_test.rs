//! Integration tests for the activity feed.

mod helpers;

use chrono::{Duration, Utc};
use uuid::Uuid;

use helpers::{InMemoryActivitySource, booking, message, tour_request};
use wanderwise_auth::authenticator::mock::DEMO_PASSWORD;
use wanderwise_entity::activity::{ActivityType, BookingActivityKind};

/// Three bookings, two messages and one tour request spread over a week.
fn week_of_activity(user: Uuid) -> InMemoryActivitySource {
    let now = Utc::now();
    InMemoryActivitySource {
        bookings: vec![
            booking(user, "pending", None, now - Duration::days(6)),
            booking(user, "confirmed", Some("pending"), now - Duration::hours(5)),
            booking(user, "confirmed", Some("paid"), now - Duration::days(2)),
        ],
        messages: vec![
            message(user, "Can we start at 9?", now - Duration::hours(1)),
            message(user, "Thanks for the tour!", now - Duration::days(4)),
        ],
        tour_requests: vec![tour_request(user, "Azores", now - Duration::days(1))],
        ..InMemoryActivitySource::default()
    }
}

#[tokio::test]
async fn test_recent_feed_is_globally_recent() {
    let user = Uuid::new_v4();
    let feed = helpers::aggregator(week_of_activity(user));

    let items = feed.recent_activities(user, 3).await;

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].activity_type, ActivityType::Message);
    assert_eq!(items[1].activity_type, ActivityType::Booking);
    assert_eq!(
        items[1].booking_kind(),
        Some(BookingActivityKind::Confirmation)
    );
    assert_eq!(items[2].activity_type, ActivityType::TourRequest);
    assert!(items.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[tokio::test]
async fn test_recent_is_prefix_of_all() {
    let user = Uuid::new_v4();
    let feed = helpers::aggregator(week_of_activity(user));

    let all = feed.all_activities(user).await;
    assert_eq!(all.len(), 6);
    assert!(all.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

    for n in 0..=7 {
        let recent = feed.recent_activities(user, n).await;
        assert!(recent.len() <= n);
        assert_eq!(recent.as_slice(), &all[..n.min(all.len())]);
    }
}

#[tokio::test]
async fn test_one_item_per_booking() {
    let user = Uuid::new_v4();
    let now = Utc::now();
    let statuses = [
        ("pending", None),
        ("confirmed", Some("paid")),
        ("cancelled", Some("paid")),
        ("cancelled", None),
        ("completed", Some("completed")),
        ("mystery", Some("refunded")),
    ];
    let bookings: Vec<_> = statuses
        .iter()
        .enumerate()
        .map(|(i, (status, paid))| booking(user, status, *paid, now - Duration::minutes(i as i64)))
        .collect();
    let ids: Vec<Uuid> = bookings.iter().map(|b| b.id).collect();

    let feed = helpers::aggregator(InMemoryActivitySource {
        bookings,
        ..InMemoryActivitySource::default()
    });
    let items = feed.all_activities(user).await;

    assert_eq!(items.len(), ids.len());
    for id in &ids {
        let expected = format!("booking-{id}");
        assert_eq!(items.iter().filter(|item| item.id == expected).count(), 1);
    }

    let kinds: Vec<_> = items.iter().filter_map(|item| item.booking_kind()).collect();
    assert_eq!(
        kinds,
        vec![
            BookingActivityKind::Creation,
            BookingActivityKind::Payment,
            BookingActivityKind::Payment,
            BookingActivityKind::Cancellation,
            BookingActivityKind::Payment,
            BookingActivityKind::Creation,
        ]
    );
}

#[tokio::test]
async fn test_failing_source_degrades_to_partial_feed() {
    let user = Uuid::new_v4();
    let feed = helpers::aggregator(week_of_activity(user).failing("messages"));

    let items = feed.all_activities(user).await;

    assert_eq!(items.len(), 4);
    assert!(
        items
            .iter()
            .all(|item| item.activity_type != ActivityType::Message)
    );
}

#[tokio::test]
async fn test_every_source_failing_yields_empty_feed() {
    let user = Uuid::new_v4();
    let source = week_of_activity(user)
        .failing("bookings")
        .failing("messages")
        .failing("tour_requests");

    assert!(helpers::aggregator(source).recent_activities(user, 3).await.is_empty());
}

#[tokio::test]
async fn test_other_users_rows_are_excluded() {
    let user = Uuid::new_v4();
    let mut source = week_of_activity(user);
    source
        .bookings
        .push(booking(Uuid::new_v4(), "pending", None, Utc::now()));

    let items = helpers::aggregator(source).all_activities(user).await;
    assert_eq!(items.len(), 6);
}

#[tokio::test]
async fn test_feed_for_signed_in_traveler() {
    let kv = helpers::memory_kv();
    let session = helpers::session_manager(&kv);
    session.initialize().await;
    let traveler = session
        .login(helpers::TRAVELER_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();

    let feed = helpers::aggregator(week_of_activity(traveler.id));
    let ctx = session.context().await;

    let items = feed.recent_for(&ctx, 3).await.unwrap();
    assert_eq!(items.len(), 3);

    session.logout().await;
    let anonymous = session.context().await;
    assert!(feed.recent_for(&anonymous, 3).await.is_err());
}
