//! User domain entities.

pub mod model;
pub mod role;

pub use model::{Gender, Principal, Profile, ProfileRow, ProfileUpdate, Registration};
pub use role::UserRole;
