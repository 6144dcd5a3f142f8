//! Pure row-to-activity mappings.
//!
//! Each source row yields exactly one [`ActivityItem`]. Nothing here touches
//! the backing store; the aggregator feeds rows in and sorts what comes out.

use chrono::{DateTime, NaiveDate, Utc};

use wanderwise_entity::activity::{
    ActivityDetails, ActivityItem, ActivityType, BookingActivityKind,
};
use wanderwise_entity::booking::{Booking, BookingStatus, PaymentStatus};
use wanderwise_entity::message::Message;
use wanderwise_entity::tour_request::TourRequest;

const UNNAMED_TOUR: &str = "a tour";

/// Classifies a booking for the feed.
///
/// Priority: payment > confirmation > cancellation > creation.
pub fn booking_kind(booking: &Booking) -> BookingActivityKind {
    if booking.payment_state() == PaymentStatus::Paid {
        return BookingActivityKind::Payment;
    }
    match booking.booking_status() {
        BookingStatus::Confirmed => BookingActivityKind::Confirmation,
        BookingStatus::Cancelled => BookingActivityKind::Cancellation,
        _ => BookingActivityKind::Creation,
    }
}

/// Maps a booking row. The item timestamp is `updated_at`, the column the
/// status changes are written through.
pub fn booking_activity(booking: &Booking) -> ActivityItem {
    let kind = booking_kind(booking);
    let tour = booking.tour_title.as_deref().unwrap_or(UNNAMED_TOUR);

    let (title, description, icon) = match kind {
        BookingActivityKind::Payment => (
            "Payment completed",
            match booking.total_amount {
                Some(amount) => format!("You paid {} for {tour}", format_amount(amount)),
                None => format!("You paid for {tour}"),
            },
            "credit-card",
        ),
        BookingActivityKind::Confirmation => (
            "Booking confirmed",
            format!("Your booking for {tour} was confirmed"),
            "check-circle",
        ),
        BookingActivityKind::Cancellation => (
            "Booking cancelled",
            format!("Your booking for {tour} was cancelled"),
            "x-circle",
        ),
        BookingActivityKind::Creation => (
            "Tour booked",
            format!(
                "You booked {tour} for {}",
                pluralize(booking.participants, "participant", "participants")
            ),
            "calendar",
        ),
    };

    ActivityItem {
        id: ActivityItem::compose_id(ActivityType::Booking, booking.id),
        activity_type: ActivityType::Booking,
        title: title.to_string(),
        description,
        timestamp: booking.updated_at,
        formatted_date: format_timestamp(booking.updated_at),
        icon: icon.to_string(),
        details: ActivityDetails::Booking {
            booking_id: booking.id,
            status: booking.status.clone(),
            payment_status: booking.payment_status.clone(),
            amount: booking.total_amount,
            participants: booking.participants,
            tour_title: booking.tour_title.clone(),
            tour_location: booking.tour_location.clone(),
            activity_type: kind,
        },
    }
}

/// Maps a sent message, truncating the body to `preview_length` characters.
pub fn message_activity(message: &Message, preview_length: usize) -> ActivityItem {
    let recipient = message.recipient_name();
    let preview = preview(&message.content, preview_length);

    ActivityItem {
        id: ActivityItem::compose_id(ActivityType::Message, message.id),
        activity_type: ActivityType::Message,
        title: "Message sent".to_string(),
        description: format!("You sent a message to {recipient}"),
        timestamp: message.created_at,
        formatted_date: format_timestamp(message.created_at),
        icon: "message-square".to_string(),
        details: ActivityDetails::Message {
            message_id: message.id,
            recipient_id: message.recipient_id,
            recipient_name: recipient,
            preview,
        },
    }
}

/// Maps a tour request into a one-sentence summary of where, when and
/// for how many.
pub fn tour_request_activity(request: &TourRequest) -> ActivityItem {
    let description = format!(
        "Trip to {} from {} to {} for {}",
        request.destination,
        format_day(request.start_date),
        format_day(request.end_date),
        pluralize(request.group_size, "traveler", "travelers"),
    );

    ActivityItem {
        id: ActivityItem::compose_id(ActivityType::TourRequest, request.id),
        activity_type: ActivityType::TourRequest,
        title: "Tour request created".to_string(),
        description,
        timestamp: request.created_at,
        formatted_date: format_timestamp(request.created_at),
        icon: "map".to_string(),
        details: ActivityDetails::TourRequest {
            request_id: request.id,
            destination: request.destination.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            group_size: request.group_size,
            status: request.status.clone(),
        },
    }
}

/// First `max_chars` characters of `content`, with `...` appended when cut.
pub fn preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

/// `Mar 5, 2025 at 14:30` (UTC).
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y at %H:%M").to_string()
}

fn format_day(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

fn pluralize(count: i32, one: &str, many: &str) -> String {
    if count == 1 {
        format!("1 {one}")
    } else {
        format!("{count} {many}")
    }
}
