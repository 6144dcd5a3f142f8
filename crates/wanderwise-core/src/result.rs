//! Convenience result type alias for WanderWise.

use crate::error::AppError;

/// A specialized `Result` type for WanderWise operations.
pub type AppResult<T> = Result<T, AppError>;
