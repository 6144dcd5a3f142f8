//! Client-side session entities.

pub mod record;

pub use record::SessionRecord;
