//! Shared fakes and fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use wanderwise_auth::{MockAuthenticator, SessionManager, SessionStore};
use wanderwise_core::config::{ActivityConfig, AuthConfig, MemoryStoreConfig, SessionConfig};
use wanderwise_core::error::AppError;
use wanderwise_core::policy::CallPolicy;
use wanderwise_core::result::AppResult;
use wanderwise_entity::booking::Booking;
use wanderwise_entity::itinerary::ItineraryBooking;
use wanderwise_entity::message::Message;
use wanderwise_entity::tour_request::TourRequest;
use wanderwise_kv::KvStoreManager;
use wanderwise_kv::memory::MemoryKvStore;
use wanderwise_service::{ActivityAggregator, ActivitySource, ItineraryLookup, PaymentLedger};

pub const TRAVELER_EMAIL: &str = "traveler@wanderwise.demo";
pub const ADMIN_EMAIL: &str = "admin@wanderwise.demo";

/// Fast policy: short timeout, one retry.
pub fn policy() -> CallPolicy {
    CallPolicy::new(Duration::from_millis(500), 1)
}

/// Key-value manager over a fresh in-memory store.
pub fn memory_kv() -> KvStoreManager {
    KvStoreManager::from_store(Arc::new(MemoryKvStore::new(&MemoryStoreConfig::default())))
}

/// Session manager over the demo accounts, sharing `kv`.
pub fn session_manager(kv: &KvStoreManager) -> SessionManager {
    SessionManager::new(
        SessionStore::new(kv.handle()),
        Arc::new(MockAuthenticator::new()),
        SessionConfig::default(),
        &AuthConfig::default(),
        policy(),
    )
}

// ── Activity ───────────────────────────────────────────────────

/// Serves rows from memory. Sources named in `failing` return errors.
#[derive(Debug, Default)]
pub struct InMemoryActivitySource {
    pub bookings: Vec<Booking>,
    pub messages: Vec<Message>,
    pub tour_requests: Vec<TourRequest>,
    pub failing: HashSet<&'static str>,
}

impl InMemoryActivitySource {
    /// Same rows, with `source` failing.
    pub fn failing(mut self, source: &'static str) -> Self {
        self.failing.insert(source);
        self
    }

    fn check(&self, source: &'static str) -> AppResult<()> {
        if self.failing.contains(source) {
            Err(AppError::validation(format!("{source} unavailable")))
        } else {
            Ok(())
        }
    }
}

fn newest<T: Clone>(
    rows: &[T],
    owner: impl Fn(&T) -> bool,
    at: impl Fn(&T) -> DateTime<Utc>,
    limit: Option<i64>,
) -> Vec<T> {
    let mut rows: Vec<T> = rows.iter().filter(|r| owner(r)).cloned().collect();
    rows.sort_by(|a, b| at(b).cmp(&at(a)));
    if let Some(limit) = limit {
        rows.truncate(limit as usize);
    }
    rows
}

#[async_trait]
impl ActivitySource for InMemoryActivitySource {
    async fn bookings(&self, user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<Booking>> {
        self.check("bookings")?;
        Ok(newest(
            &self.bookings,
            |b| b.traveler_id == user_id,
            |b| b.updated_at,
            limit,
        ))
    }

    async fn messages(&self, user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<Message>> {
        self.check("messages")?;
        Ok(newest(
            &self.messages,
            |m| m.sender_id == user_id,
            |m| m.created_at,
            limit,
        ))
    }

    async fn tour_requests(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<TourRequest>> {
        self.check("tour_requests")?;
        Ok(newest(
            &self.tour_requests,
            |r| r.traveler_id == user_id,
            |r| r.created_at,
            limit,
        ))
    }
}

/// Aggregator over `source` with default feed settings.
pub fn aggregator(source: InMemoryActivitySource) -> ActivityAggregator {
    ActivityAggregator::new(Arc::new(source), ActivityConfig::default(), policy())
}

pub fn booking(
    traveler_id: Uuid,
    status: &str,
    payment_status: Option<&str>,
    updated_at: DateTime<Utc>,
) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        traveler_id,
        tour_id: Some(Uuid::new_v4()),
        status: status.to_string(),
        payment_status: payment_status.map(str::to_string),
        total_amount: Some(180.0),
        participants: 2,
        booking_date: None,
        payment_due_date: None,
        created_at: updated_at - chrono::Duration::days(1),
        updated_at,
        tour_title: Some("Sintra Palaces Day Trip".to_string()),
        tour_location: Some("Sintra".to_string()),
    }
}

pub fn message(sender_id: Uuid, content: &str, created_at: DateTime<Utc>) -> Message {
    Message {
        id: Uuid::new_v4(),
        sender_id,
        recipient_id: Uuid::new_v4(),
        content: content.to_string(),
        created_at,
        recipient_first_name: Some("Rafael".to_string()),
        recipient_last_name: Some("Ortiz".to_string()),
        recipient_username: Some("demo_guide".to_string()),
    }
}

pub fn tour_request(traveler_id: Uuid, destination: &str, created_at: DateTime<Utc>) -> TourRequest {
    TourRequest {
        id: Uuid::new_v4(),
        traveler_id,
        destination: destination.to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap_or_default(),
        end_date: NaiveDate::from_ymd_opt(2025, 9, 14).unwrap_or_default(),
        group_size: 3,
        budget: Some(1500.0),
        status: "open".to_string(),
        created_at,
        updated_at: created_at,
    }
}

// ── Payments ───────────────────────────────────────────────────

/// Ledger holding completed payments for a fixed set of ids.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    pub paid: HashSet<Uuid>,
    pub calls: AtomicU32,
}

impl InMemoryLedger {
    pub fn with_paid(ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            paid: ids.into_iter().collect(),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentLedger for InMemoryLedger {
    async fn has_completed_payment(&self, booking_id: Uuid) -> AppResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.paid.contains(&booking_id))
    }
}

/// Ledger that always fails, either with an error or by hanging.
#[derive(Debug, Default)]
pub struct FailingLedger {
    pub hang: bool,
    pub calls: AtomicU32,
}

impl FailingLedger {
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentLedger for FailingLedger {
    async fn has_completed_payment(&self, _booking_id: Uuid) -> AppResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Err(AppError::database("ledger unreachable"))
    }
}

/// Itinerary bookings held in memory.
#[derive(Debug, Default)]
pub struct InMemoryItineraries(pub Vec<ItineraryBooking>);

#[async_trait]
impl ItineraryLookup for InMemoryItineraries {
    async fn itinerary_booking(&self, id: Uuid) -> AppResult<Option<ItineraryBooking>> {
        Ok(self.0.iter().find(|b| b.id == id).cloned())
    }
}

pub fn itinerary_booking(status: &str, payment_status: Option<&str>) -> ItineraryBooking {
    let now = Utc::now();
    ItineraryBooking {
        id: Uuid::new_v4(),
        traveler_id: Uuid::new_v4(),
        guide_id: Some(Uuid::new_v4()),
        tour_request_id: Some(Uuid::new_v4()),
        status: status.to_string(),
        payment_status: payment_status.map(str::to_string),
        payment_due_date: None,
        confirmed_total: None,
        amount: Some(500.0),
        created_at: now,
        updated_at: now,
    }
}
