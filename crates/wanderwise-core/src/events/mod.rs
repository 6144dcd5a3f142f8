//! Domain events emitted by WanderWise operations.

pub mod session;

pub use session::{SessionEndReason, SessionEvent};
