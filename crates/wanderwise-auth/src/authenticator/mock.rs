//! In-memory authenticator with seeded demo accounts.
//!
//! Used for demos and local development when no database is available.
//! Accounts registered here live only as long as the process.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use wanderwise_core::error::AppError;
use wanderwise_core::result::AppResult;
use wanderwise_entity::user::{Principal, Profile, ProfileUpdate, Registration, UserRole};

use super::Authenticator;

/// Password shared by every seeded demo account.
pub const DEMO_PASSWORD: &str = "wanderwise-demo";

#[derive(Debug, Clone)]
struct MockAccount {
    principal: Principal,
    password: String,
}

/// Authenticator over a fixed set of demo accounts.
#[derive(Debug)]
pub struct MockAuthenticator {
    /// Accounts keyed by lowercase email.
    accounts: RwLock<HashMap<String, MockAccount>>,
}

impl MockAuthenticator {
    /// Creates the authenticator with the demo accounts seeded.
    pub fn new() -> Self {
        let accounts = demo_accounts()
            .into_iter()
            .map(|principal| {
                let account = MockAccount {
                    principal,
                    password: DEMO_PASSWORD.to_string(),
                };
                (account.principal.email.to_lowercase(), account)
            })
            .collect();

        Self {
            accounts: RwLock::new(accounts),
        }
    }

    /// Whether `user_id` belongs to an account this authenticator holds.
    pub async fn knows(&self, user_id: Uuid) -> bool {
        self.accounts
            .read()
            .await
            .values()
            .any(|a| a.principal.id == user_id)
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn supports_password_change(&self) -> bool {
        false
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<Principal> {
        let accounts = self.accounts.read().await;
        match accounts.get(&email.trim().to_lowercase()) {
            Some(account) if account.password == password => {
                debug!(user_id = %account.principal.id, "Mock login accepted");
                Ok(account.principal.clone())
            }
            _ => Err(AppError::authentication("Invalid email or password")),
        }
    }

    async fn register(&self, registration: &Registration) -> AppResult<Principal> {
        let email = registration.email.trim().to_lowercase();
        let mut accounts = self.accounts.write().await;

        let username_taken = accounts.values().any(|a| {
            a.principal
                .username
                .eq_ignore_ascii_case(registration.username.trim())
        });
        if accounts.contains_key(&email) || username_taken {
            return Err(AppError::conflict(
                "An account with this email or username already exists",
            ));
        }

        let principal = Principal {
            id: Uuid::new_v4(),
            email: registration.email.trim().to_string(),
            username: registration.username.trim().to_string(),
            role: registration.role,
            profile: Profile {
                first_name: registration.first_name.trim().to_string(),
                last_name: registration.last_name.trim().to_string(),
                phone: registration.phone.clone(),
                ..Profile::default()
            },
            date_of_birth: registration.date_of_birth,
            gender: registration.gender,
            created_at: Utc::now(),
            is_active: true,
        };

        accounts.insert(
            email,
            MockAccount {
                principal: principal.clone(),
                password: registration.password.clone(),
            },
        );
        info!(user_id = %principal.id, "Mock account registered");
        Ok(principal)
    }

    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> AppResult<bool> {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts
            .values_mut()
            .find(|a| a.principal.id == user_id)
        {
            account.principal = update.merged_into(&account.principal);
        }
        // Demo identities restored from an earlier run are not held here;
        // their profile lives only in the session.
        Ok(true)
    }

    async fn update_password(&self, _user_id: Uuid, _current: &str, _new: &str) -> AppResult<()> {
        Err(AppError::not_implemented(
            "Password changes are not available for demo accounts",
        ))
    }

    async fn logout(&self, user_id: Uuid) -> AppResult<()> {
        debug!(user_id = %user_id, "Mock logout");
        Ok(())
    }
}

fn demo_accounts() -> Vec<Principal> {
    let created_at = DateTime::<Utc>::from_timestamp(1_704_067_200, 0).unwrap_or_default();

    vec![
        Principal {
            id: Uuid::from_u128(0x5eed_0000_0000_4000_8000_0000_0000_0001),
            email: "traveler@wanderwise.demo".to_string(),
            username: "demo_traveler".to_string(),
            role: UserRole::Traveler,
            profile: Profile {
                first_name: "Maya".to_string(),
                last_name: "Torres".to_string(),
                location: Some("Lisbon, Portugal".to_string()),
                languages: vec!["English".to_string(), "Portuguese".to_string()],
                ..Profile::default()
            },
            date_of_birth: None,
            gender: None,
            created_at,
            is_active: true,
        },
        Principal {
            id: Uuid::from_u128(0x5eed_0000_0000_4000_8000_0000_0000_0002),
            email: "guide@wanderwise.demo".to_string(),
            username: "demo_guide".to_string(),
            role: UserRole::TourGuide,
            profile: Profile {
                first_name: "Rafael".to_string(),
                last_name: "Ortiz".to_string(),
                location: Some("Cusco, Peru".to_string()),
                bio: Some("Mountain trekking and Inca history.".to_string()),
                languages: vec!["Spanish".to_string(), "English".to_string()],
                experience: Some("8 years".to_string()),
                ..Profile::default()
            },
            date_of_birth: None,
            gender: None,
            created_at,
            is_active: true,
        },
        Principal {
            id: Uuid::from_u128(0x5eed_0000_0000_4000_8000_0000_0000_0003),
            email: "admin@wanderwise.demo".to_string(),
            username: "demo_admin".to_string(),
            role: UserRole::Admin,
            profile: Profile {
                first_name: "Ines".to_string(),
                last_name: "Park".to_string(),
                ..Profile::default()
            },
            date_of_birth: None,
            gender: None,
            created_at,
            is_active: true,
        },
    ]
}
