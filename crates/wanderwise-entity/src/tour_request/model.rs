//! Tour request row model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row of the `tour_requests` table: a traveler asking guides for a custom trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TourRequest {
    pub id: Uuid,
    pub traveler_id: Uuid,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub group_size: i32,
    pub budget: Option<f64>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
