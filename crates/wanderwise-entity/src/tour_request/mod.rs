//! Tour request entity.

pub mod model;

pub use model::TourRequest;
