//! Itinerary (custom trip) booking entity.

pub mod model;

pub use model::ItineraryBooking;
