//! Derived activity feed entries.

pub mod item;

pub use item::{ActivityDetails, ActivityItem, ActivityType, BookingActivityKind};
