//! Ordered rule chain from booking fields to a display state.
//!
//! The rules are evaluated top to bottom and the first match wins:
//!
//! 1. `cancelled` when the booking status is cancelled
//! 2. `completed` when the booking status is completed
//! 3. `paid` when the payment status is paid
//! 4. `expired` when the payment due date has passed
//! 5. `awaiting_payment` when confirmed with a positive amount
//! 6. `pending` otherwise
//!
//! Unrecognised status strings never match a rule, so they fall through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wanderwise_entity::booking::{Booking, BookingStatus, PaymentStatus};
use wanderwise_entity::itinerary::ItineraryBooking;
use wanderwise_entity::payment::BookingPaymentState;

/// The fields the classification reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentInputs {
    pub status: String,
    pub payment_status: Option<String>,
    pub payment_due_date: Option<DateTime<Utc>>,
    /// Confirmed total, else the quoted amount.
    pub amount: Option<f64>,
}

impl From<&Booking> for PaymentInputs {
    fn from(booking: &Booking) -> Self {
        Self {
            status: booking.status.clone(),
            payment_status: booking.payment_status.clone(),
            payment_due_date: booking.payment_due_date,
            amount: booking.total_amount,
        }
    }
}

impl From<&ItineraryBooking> for PaymentInputs {
    fn from(booking: &ItineraryBooking) -> Self {
        Self {
            status: booking.status.clone(),
            payment_status: booking.payment_status.clone(),
            payment_due_date: booking.payment_due_date,
            amount: booking.effective_amount(),
        }
    }
}

/// Classifies against the current time.
pub fn classify(inputs: &PaymentInputs) -> BookingPaymentState {
    classify_at(inputs, Utc::now())
}

/// Classifies against `now`.
pub fn classify_at(inputs: &PaymentInputs, now: DateTime<Utc>) -> BookingPaymentState {
    let status = BookingStatus::parse(&inputs.status);
    let payment = PaymentStatus::parse_opt(inputs.payment_status.as_deref());

    if status == BookingStatus::Cancelled {
        return BookingPaymentState::Cancelled;
    }
    if status == BookingStatus::Completed {
        return BookingPaymentState::Completed;
    }
    if payment == PaymentStatus::Paid {
        return BookingPaymentState::Paid;
    }
    if inputs.payment_due_date.is_some_and(|due| due < now) {
        return BookingPaymentState::Expired;
    }
    if status == BookingStatus::Confirmed && inputs.amount.is_some_and(|amount| amount > 0.0) {
        return BookingPaymentState::AwaitingPayment;
    }
    BookingPaymentState::Pending
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn inputs(status: &str, payment_status: Option<&str>, amount: Option<f64>) -> PaymentInputs {
        PaymentInputs {
            status: status.to_string(),
            payment_status: payment_status.map(str::to_string),
            payment_due_date: None,
            amount,
        }
    }

    #[test]
    fn test_cancelled_short_circuits_paid() {
        let i = inputs("cancelled", Some("paid"), Some(100.0));
        assert_eq!(classify(&i), BookingPaymentState::Cancelled);
    }

    #[test]
    fn test_confirmed_with_future_due_awaits_payment() {
        let now = Utc::now();
        let i = PaymentInputs {
            payment_due_date: Some(now + Duration::days(2)),
            ..inputs("confirmed", Some("pending"), Some(500.0))
        };
        assert_eq!(classify_at(&i, now), BookingPaymentState::AwaitingPayment);
    }

    #[test]
    fn test_confirmed_with_past_due_is_expired() {
        let now = Utc::now();
        let i = PaymentInputs {
            payment_due_date: Some(now - Duration::hours(1)),
            ..inputs("confirmed", Some("pending"), Some(500.0))
        };
        assert_eq!(classify_at(&i, now), BookingPaymentState::Expired);
    }

    #[test]
    fn test_paid_beats_expired() {
        let now = Utc::now();
        let i = PaymentInputs {
            payment_due_date: Some(now - Duration::days(1)),
            ..inputs("confirmed", Some("paid"), Some(500.0))
        };
        assert_eq!(classify_at(&i, now), BookingPaymentState::Paid);
    }

    #[test]
    fn test_completed_status() {
        let i = inputs("completed", Some("pending"), Some(80.0));
        assert_eq!(classify(&i), BookingPaymentState::Completed);
    }

    #[test]
    fn test_confirmed_without_amount_is_pending() {
        assert_eq!(
            classify(&inputs("confirmed", None, None)),
            BookingPaymentState::Pending
        );
        assert_eq!(
            classify(&inputs("confirmed", None, Some(0.0))),
            BookingPaymentState::Pending
        );
    }

    #[test]
    fn test_unknown_values_fall_through() {
        assert_eq!(
            classify(&inputs("on_hold", Some("mystery"), Some(10.0))),
            BookingPaymentState::Pending
        );
        assert_eq!(classify(&PaymentInputs::default()), BookingPaymentState::Pending);
    }

    #[test]
    fn test_itinerary_prefers_confirmed_total() {
        let now = Utc::now();
        let booking = ItineraryBooking {
            id: uuid::Uuid::new_v4(),
            traveler_id: uuid::Uuid::new_v4(),
            guide_id: None,
            tour_request_id: None,
            status: "confirmed".to_string(),
            payment_status: None,
            payment_due_date: None,
            confirmed_total: Some(320.0),
            amount: Some(0.0),
            created_at: now,
            updated_at: now,
        };
        let i = PaymentInputs::from(&booking);
        assert_eq!(i.amount, Some(320.0));
        assert_eq!(classify_at(&i, now), BookingPaymentState::AwaitingPayment);
    }
}
