//! Repository implementations for the WanderWise tables.

pub mod booking;
pub mod itinerary;
pub mod message;
pub mod payment;
pub mod profile;
pub mod tour_request;

pub use booking::BookingRepository;
pub use itinerary::ItineraryBookingRepository;
pub use message::MessageRepository;
pub use payment::PaymentRepository;
pub use profile::ProfileRepository;
pub use tour_request::TourRequestRepository;
