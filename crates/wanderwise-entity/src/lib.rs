//! # wanderwise-entity
//!
//! Domain entity models for WanderWise. Row structs derive
//! `sqlx::FromRow`; derived values (session records, activity items,
//! payment states) are plain value objects.

pub mod activity;
pub mod booking;
pub mod itinerary;
pub mod message;
pub mod payment;
pub mod session;
pub mod tour_request;
pub mod user;
