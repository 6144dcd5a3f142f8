//! Activity item model.
//!
//! Activity items are never stored. They are derived on each request from
//! bookings, messages and tour requests, and carry a details value whose
//! shape depends on the source.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The source an activity item was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Booking,
    Message,
    ProfileUpdate,
    TourRequest,
}

impl ActivityType {
    /// Return the type as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booking => "booking",
            Self::Message => "message",
            Self::ProfileUpdate => "profile_update",
            Self::TourRequest => "tour_request",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What happened to a booking, as shown in the feed.
///
/// Priority when several apply: payment > confirmation > cancellation > creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingActivityKind {
    Creation,
    Confirmation,
    Payment,
    Cancellation,
}

impl BookingActivityKind {
    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creation => "creation",
            Self::Confirmation => "confirmation",
            Self::Payment => "payment",
            Self::Cancellation => "cancellation",
        }
    }
}

impl fmt::Display for BookingActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source-specific details of an activity item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityDetails {
    Booking {
        booking_id: Uuid,
        status: String,
        payment_status: Option<String>,
        amount: Option<f64>,
        participants: i32,
        tour_title: Option<String>,
        tour_location: Option<String>,
        activity_type: BookingActivityKind,
    },
    Message {
        message_id: Uuid,
        recipient_id: Uuid,
        recipient_name: String,
        preview: String,
    },
    TourRequest {
        request_id: Uuid,
        destination: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        group_size: i32,
        status: String,
    },
}

/// One entry of the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    /// `"{type}-{source id}"`.
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    /// Human-readable form of `timestamp`.
    pub formatted_date: String,
    /// Icon name understood by the front end.
    pub icon: String,
    pub details: ActivityDetails,
}

impl ActivityItem {
    /// Build the composite identifier for an item.
    pub fn compose_id(activity_type: ActivityType, source_id: Uuid) -> String {
        format!("{}-{}", activity_type.as_str(), source_id)
    }

    /// Booking sub-classification, when this item came from a booking.
    pub fn booking_kind(&self) -> Option<BookingActivityKind> {
        match &self.details {
            ActivityDetails::Booking { activity_type, .. } => Some(*activity_type),
            _ => None,
        }
    }
}
