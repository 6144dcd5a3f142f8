//! Payment status resolution against the ledger.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use wanderwise_core::error::AppError;
use wanderwise_core::policy::CallPolicy;
use wanderwise_core::result::AppResult;
use wanderwise_entity::payment::BookingPaymentState;

use super::classifier::{PaymentInputs, classify};
use super::ledger::{ItineraryLookup, PaymentLedger};

/// Resolves the display state of itinerary bookings.
///
/// The `payment_status` column can lag behind the ledger, so a booking is
/// only reported as paid for certain when the ledger holds a completed
/// payment for it.
#[derive(Debug, Clone)]
pub struct PaymentStatusResolver {
    ledger: Arc<dyn PaymentLedger>,
    itineraries: Arc<dyn ItineraryLookup>,
    policy: CallPolicy,
}

impl PaymentStatusResolver {
    /// Creates a new resolver.
    pub fn new(
        ledger: Arc<dyn PaymentLedger>,
        itineraries: Arc<dyn ItineraryLookup>,
        policy: CallPolicy,
    ) -> Self {
        Self {
            ledger,
            itineraries,
            policy,
        }
    }

    /// Whether the ledger holds a completed payment for `booking_id`.
    ///
    /// Fails closed: a missing id, a ledger error or a timeout all read as
    /// unpaid.
    pub async fn is_paid(&self, booking_id: Option<Uuid>) -> bool {
        let Some(booking_id) = booking_id else {
            return false;
        };

        let ledger = self.ledger.as_ref();
        match self
            .policy
            .call("payment ledger", move || ledger.has_completed_payment(booking_id))
            .await
        {
            Ok(paid) => paid,
            Err(e) => {
                warn!(
                    booking_id = %booking_id,
                    error = %e,
                    "Payment ledger check failed, treating booking as unpaid"
                );
                false
            }
        }
    }

    /// Classifies an itinerary booking, confirming payment with the ledger.
    pub async fn resolve(&self, itinerary_booking_id: Uuid) -> AppResult<BookingPaymentState> {
        let itineraries = self.itineraries.as_ref();
        let booking = self
            .policy
            .call("itinerary lookup", move || {
                itineraries.itinerary_booking(itinerary_booking_id)
            })
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Itinerary booking {itinerary_booking_id} not found"
                ))
            })?;

        let state = self
            .confirm_with_ledger(booking.id, PaymentInputs::from(&booking))
            .await;
        debug!(
            booking_id = %booking.id,
            state = %state,
            "Resolved payment state"
        );
        Ok(state)
    }

    /// Classifies `inputs`, upgrading to `paid` when the ledger confirms a
    /// payment for `booking_id`. Cancelled and completed bookings are left
    /// alone.
    pub async fn confirm_with_ledger(
        &self,
        booking_id: Uuid,
        inputs: PaymentInputs,
    ) -> BookingPaymentState {
        let state = classify(&inputs);
        if state.is_terminal() || state == BookingPaymentState::Paid {
            return state;
        }
        if self.is_paid(Some(booking_id)).await {
            BookingPaymentState::Paid
        } else {
            state
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use wanderwise_core::error::ErrorKind;
    use wanderwise_entity::itinerary::ItineraryBooking;

    #[derive(Debug, Default)]
    struct Ledger {
        paid: Vec<Uuid>,
        broken: bool,
        calls: AtomicU32,
    }

    #[async_trait]
    impl PaymentLedger for Ledger {
        async fn has_completed_payment(&self, booking_id: Uuid) -> AppResult<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.broken {
                return Err(AppError::database("ledger offline"));
            }
            Ok(self.paid.contains(&booking_id))
        }
    }

    #[derive(Debug, Default)]
    struct Itineraries(HashMap<Uuid, ItineraryBooking>);

    #[async_trait]
    impl ItineraryLookup for Itineraries {
        async fn itinerary_booking(&self, id: Uuid) -> AppResult<Option<ItineraryBooking>> {
            Ok(self.0.get(&id).cloned())
        }
    }

    fn itinerary(status: &str) -> ItineraryBooking {
        let now = Utc::now();
        ItineraryBooking {
            id: Uuid::new_v4(),
            traveler_id: Uuid::new_v4(),
            guide_id: None,
            tour_request_id: None,
            status: status.to_string(),
            payment_status: Some("pending".to_string()),
            payment_due_date: None,
            confirmed_total: Some(450.0),
            amount: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn resolver(ledger: Ledger, bookings: Vec<ItineraryBooking>) -> (PaymentStatusResolver, Arc<Ledger>) {
        let ledger = Arc::new(ledger);
        let lookup = Itineraries(bookings.into_iter().map(|b| (b.id, b)).collect());
        let resolver = PaymentStatusResolver::new(
            Arc::clone(&ledger) as Arc<dyn PaymentLedger>,
            Arc::new(lookup),
            CallPolicy::new(Duration::from_secs(1), 1),
        );
        (resolver, ledger)
    }

    #[tokio::test]
    async fn test_missing_id_skips_the_ledger() {
        let (resolver, ledger) = resolver(Ledger::default(), Vec::new());
        assert!(!resolver.is_paid(None).await);
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ledger_error_fails_closed() {
        let (resolver, ledger) = resolver(
            Ledger {
                broken: true,
                ..Ledger::default()
            },
            Vec::new(),
        );
        assert!(!resolver.is_paid(Some(Uuid::new_v4())).await);
        // One retry for a transient database failure.
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_resolve_upgrades_to_paid() {
        let booking = itinerary("confirmed");
        let id = booking.id;
        let (resolver, _) = resolver(
            Ledger {
                paid: vec![id],
                ..Ledger::default()
            },
            vec![booking],
        );
        assert_eq!(resolver.resolve(id).await.unwrap(), BookingPaymentState::Paid);
    }

    #[tokio::test]
    async fn test_resolve_without_payment_awaits() {
        let booking = itinerary("confirmed");
        let id = booking.id;
        let (resolver, _) = resolver(Ledger::default(), vec![booking]);
        assert_eq!(
            resolver.resolve(id).await.unwrap(),
            BookingPaymentState::AwaitingPayment
        );
    }

    #[tokio::test]
    async fn test_cancelled_is_not_upgraded() {
        let booking = itinerary("cancelled");
        let id = booking.id;
        let (resolver, ledger) = resolver(
            Ledger {
                paid: vec![id],
                ..Ledger::default()
            },
            vec![booking],
        );
        assert_eq!(
            resolver.resolve(id).await.unwrap(),
            BookingPaymentState::Cancelled
        );
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_booking_is_not_found() {
        let (resolver, _) = resolver(Ledger::default(), Vec::new());
        let err = resolver.resolve(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
