//! Wires the crates together for one CLI invocation.

use std::sync::Arc;

use tracing::debug;

use wanderwise_auth::{SessionManager, SessionStore, build_authenticator};
use wanderwise_core::config::AppConfig;
use wanderwise_core::error::AppError;
use wanderwise_core::policy::CallPolicy;
use wanderwise_database::connection::DatabasePool;
use wanderwise_database::repositories::{
    BookingRepository, ItineraryBookingRepository, MessageRepository, PaymentRepository,
    ProfileRepository, TourRequestRepository,
};
use wanderwise_kv::KvStoreManager;
use wanderwise_service::{ActivityAggregator, PaymentStatusResolver, RepositoryActivitySource};

/// Long-lived services shared by every command.
#[derive(Debug)]
pub struct App {
    pub config: AppConfig,
    pub db: DatabasePool,
    pub session: SessionManager,
    pub activity: ActivityAggregator,
    pub payments: PaymentStatusResolver,
}

impl App {
    /// Build every service from configuration.
    ///
    /// The database pool is lazy, so commands that never query it work
    /// without a reachable database.
    pub async fn build(config: AppConfig) -> Result<Self, AppError> {
        let db = DatabasePool::connect_lazy(&config.database)?;
        let pool = db.pool().clone();
        let policy = CallPolicy::from_config(&config.collaborator);

        let kv = KvStoreManager::new(&config.storage).await?;
        debug!(provider = ?config.storage.provider, "Key-value store ready");

        let authenticator = build_authenticator(&config.auth, ProfileRepository::new(pool.clone()));
        let session = SessionManager::new(
            SessionStore::new(kv.handle()),
            authenticator,
            config.session.clone(),
            &config.auth,
            policy,
        );

        let source = RepositoryActivitySource::new(
            BookingRepository::new(pool.clone()),
            MessageRepository::new(pool.clone()),
            TourRequestRepository::new(pool.clone()),
        );
        let activity = ActivityAggregator::new(Arc::new(source), config.activity.clone(), policy);

        let payments = PaymentStatusResolver::new(
            Arc::new(PaymentRepository::new(pool.clone())),
            Arc::new(ItineraryBookingRepository::new(pool)),
            policy,
        );

        Ok(Self {
            config,
            db,
            session,
            activity,
            payments,
        })
    }
}
