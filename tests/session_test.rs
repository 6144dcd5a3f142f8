//! Integration tests for the persisted session lifecycle.

mod helpers;

use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};

use wanderwise_auth::SessionSync;
use wanderwise_auth::authenticator::mock::DEMO_PASSWORD;
use wanderwise_core::events::{SessionEndReason, SessionEvent};
use wanderwise_core::traits::KeyValueStore;
use wanderwise_entity::session::SessionRecord;
use wanderwise_entity::user::{Principal, Profile, UserRole};
use wanderwise_kv::{KvStoreManager, keys};

fn principal(role: UserRole) -> Principal {
    Principal {
        id: uuid::Uuid::new_v4(),
        email: "lena@example.com".to_string(),
        username: "lena".to_string(),
        role,
        profile: Profile {
            first_name: "Lena".to_string(),
            last_name: "Vogel".to_string(),
            ..Profile::default()
        },
        date_of_birth: None,
        gender: None,
        created_at: Utc::now(),
        is_active: true,
    }
}

async fn write_session(kv: &KvStoreManager, user: &Principal, last_activity_ms: i64) {
    let handle = kv.handle();
    handle.set_json(keys::USER, user).await.unwrap();
    handle
        .set(keys::SESSION_TIMESTAMP, &last_activity_ms.to_string())
        .await
        .unwrap();
    handle
        .set(
            keys::SESSION_TIMEOUT,
            &Duration::hours(24).num_milliseconds().to_string(),
        )
        .await
        .unwrap();
    handle.set(keys::LOGGED_IN, "true").await.unwrap();
}

#[tokio::test]
async fn test_expired_session_is_cleared_on_restore() {
    let kv = helpers::memory_kv();
    let stale = (Utc::now() - Duration::hours(25)).timestamp_millis();
    write_session(&kv, &principal(UserRole::Traveler), stale).await;

    let manager = helpers::session_manager(&kv);
    let ctx = manager.initialize().await;

    assert!(!ctx.is_logged_in());
    let handle = kv.handle();
    for key in keys::all_session_keys() {
        assert!(handle.get(key).await.unwrap().is_none(), "{key} survived");
    }
}

#[test]
fn test_session_invalid_at_exact_timeout() {
    let start = Utc::now();
    let record = SessionRecord::new(principal(UserRole::Traveler), start, Duration::hours(24));

    assert!(record.is_valid_at(start + Duration::hours(24) - Duration::milliseconds(1)));
    assert!(!record.is_valid_at(start + Duration::hours(24)));
    assert!(!record.is_valid_at(start + Duration::hours(30)));
}

#[tokio::test]
async fn test_restore_does_not_refresh_timestamp() {
    let kv = helpers::memory_kv();
    let user = principal(UserRole::TourGuide);
    let earlier = (Utc::now() - Duration::hours(2)).timestamp_millis();
    write_session(&kv, &user, earlier).await;

    let manager = helpers::session_manager(&kv);
    let ctx = manager.initialize().await;

    assert_eq!(ctx.user_id(), Some(user.id));
    let stored = kv.handle().get(keys::SESSION_TIMESTAMP).await.unwrap();
    assert_eq!(stored, Some(earlier.to_string()));

    // A real interaction does move it.
    assert!(manager.record_activity().await);
    let touched: i64 = kv
        .handle()
        .get(keys::SESSION_TIMESTAMP)
        .await
        .unwrap()
        .unwrap()
        .parse()
        .unwrap();
    assert!(touched > earlier);
    manager.shutdown();
}

#[tokio::test]
async fn test_legacy_session_is_migrated_as_traveler() {
    let kv = helpers::memory_kv();
    let user = principal(UserRole::Traveler);
    let mut legacy = serde_json::to_value(&user).unwrap();
    legacy["role"] = serde_json::Value::from("user");

    let handle = kv.handle();
    handle
        .set(keys::LEGACY_USER, &legacy.to_string())
        .await
        .unwrap();
    handle.set(keys::LEGACY_LOGGED_IN, "true").await.unwrap();

    let manager = helpers::session_manager(&kv);
    let ctx = manager.initialize().await;

    assert_eq!(ctx.user_id(), Some(user.id));
    assert_eq!(ctx.role(), Some(UserRole::Traveler));
    assert!(!manager.is_min_role(UserRole::TourGuide).await);
    assert!(manager.is_min_role(UserRole::Traveler).await);

    assert!(handle.get(keys::LEGACY_USER).await.unwrap().is_none());
    assert!(handle.get(keys::LEGACY_LOGGED_IN).await.unwrap().is_none());
    assert_eq!(
        handle.get(keys::LOGGED_IN).await.unwrap().as_deref(),
        Some("true")
    );
    assert!(handle.get(keys::SESSION_TIMESTAMP).await.unwrap().is_some());
    manager.shutdown();
}

#[tokio::test]
async fn test_admin_passes_every_role_gate() {
    let kv = helpers::memory_kv();
    let manager = helpers::session_manager(&kv);
    manager.initialize().await;

    let admin = manager
        .login(helpers::ADMIN_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();

    assert_eq!(admin.role, UserRole::Admin);
    assert!(manager.is_min_role(UserRole::TourGuide).await);
    assert!(manager.is_role(UserRole::Admin).await);
    assert!(!manager.is_role(UserRole::TourGuide).await);
    assert!(
        manager
            .has_permission(wanderwise_auth::Permission::ManageOwnTours)
            .await
    );
    manager.shutdown();
}

#[tokio::test]
async fn test_login_persists_and_logout_clears() {
    let kv = helpers::memory_kv();
    let manager = helpers::session_manager(&kv);
    manager.initialize().await;

    let user = manager
        .login(helpers::TRAVELER_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();

    // A second manager over the same store restores the same principal.
    let other = helpers::session_manager(&kv);
    assert_eq!(other.initialize().await.user_id(), Some(user.id));
    other.shutdown();

    manager.logout().await;
    assert!(!manager.is_logged_in().await);
    let handle = kv.handle();
    for key in keys::all_session_keys() {
        assert!(handle.get(key).await.unwrap().is_none(), "{key} survived");
    }
}

#[tokio::test]
async fn test_logout_elsewhere_ends_this_session() {
    let kv = helpers::memory_kv();

    let first = helpers::session_manager(&kv);
    first.initialize().await;
    let user = first
        .login(helpers::TRAVELER_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();

    let second = helpers::session_manager(&kv);
    assert_eq!(second.initialize().await.user_id(), Some(user.id));
    let mut events = second.subscribe_events();
    let sync = SessionSync::spawn(second.clone());

    first.logout().await;

    let ended = tokio::time::timeout(StdDuration::from_secs(2), async {
        loop {
            match events.recv().await {
                Ok(SessionEvent::Ended { user_id, reason }) => break (user_id, reason),
                Ok(_) => continue,
                Err(e) => panic!("event channel failed: {e}"),
            }
        }
    })
    .await
    .expect("no remote logout observed");

    assert_eq!(ended, (Some(user.id), SessionEndReason::RemoteLogout));
    assert!(!second.is_logged_in().await);

    second.shutdown();
    sync.await.unwrap();
    first.shutdown();
}

#[tokio::test]
async fn test_login_elsewhere_keeps_this_session() {
    let kv = helpers::memory_kv();

    let first = helpers::session_manager(&kv);
    first.initialize().await;
    let user = first
        .login(helpers::TRAVELER_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();
    let sync = SessionSync::spawn(first.clone());

    let second = helpers::session_manager(&kv);
    second.initialize().await;
    second
        .login(helpers::ADMIN_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();

    // Give the listener time to see every change the login published.
    tokio::time::sleep(StdDuration::from_millis(100)).await;

    assert_eq!(
        kv.handle().get(keys::LOGGED_IN).await.unwrap().as_deref(),
        Some("true")
    );
    assert!(first.is_logged_in().await);
    assert_eq!(first.context().await.user_id(), Some(user.id));

    first.shutdown();
    sync.await.unwrap();
    second.shutdown();
}

#[tokio::test]
async fn test_activity_elsewhere_keeps_session_alive() {
    let kv = helpers::memory_kv();
    let user = principal(UserRole::Traveler);
    // Restored with half a second left before the timeout.
    let nearly_expired = (Utc::now() - Duration::hours(24) + Duration::milliseconds(500))
        .timestamp_millis();
    write_session(&kv, &user, nearly_expired).await;

    let idle = helpers::session_manager(&kv);
    let busy = helpers::session_manager(&kv);
    assert_eq!(idle.initialize().await.user_id(), Some(user.id));
    assert_eq!(busy.initialize().await.user_id(), Some(user.id));

    assert!(busy.record_activity().await);
    tokio::time::sleep(StdDuration::from_millis(700)).await;

    // The idle copy is past its timeout, the stored timestamp is not.
    assert!(idle.record_activity().await);
    assert!(idle.is_logged_in().await);
    assert_eq!(
        kv.handle().get(keys::LOGGED_IN).await.unwrap().as_deref(),
        Some("true")
    );

    idle.shutdown();
    busy.shutdown();
}

#[tokio::test]
async fn test_bad_credentials_leave_storage_untouched() {
    let kv = helpers::memory_kv();
    let manager = helpers::session_manager(&kv);
    manager.initialize().await;

    let err = manager
        .login(helpers::TRAVELER_EMAIL, "not-the-password")
        .await
        .unwrap_err();

    assert_eq!(err, wanderwise_auth::AuthError::InvalidCredentials);
    assert!(kv.handle().get(keys::LOGGED_IN).await.unwrap().is_none());
}
