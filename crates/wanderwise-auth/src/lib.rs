//! # wanderwise-auth
//!
//! Authentication and the client-side session lifecycle for WanderWise.
//!
//! ## Modules
//!
//! - `authenticator`: the credential collaborator (database, mock, opt-in fallback)
//! - `password`: Argon2id hashing and registration/password policy
//! - `rbac`: role-gated permission checks
//! - `session`: persisted session, expiry monitor and cross-instance sync

pub mod authenticator;
pub mod error;
pub mod password;
pub mod rbac;
pub mod session;

pub use authenticator::{
    Authenticator, DatabaseAuthenticator, FallbackAuthenticator, MockAuthenticator,
    build_authenticator,
};
pub use error::AuthError;
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{Permission, RbacEnforcer, RbacPolicies};
pub use session::{ExpiryMonitor, SessionContext, SessionManager, SessionStore, SessionSync};
