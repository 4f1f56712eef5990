//! Convenience result type alias for Foodgate.

use crate::error::AppError;

/// A specialized `Result` type for Foodgate operations.
pub type AppResult<T> = Result<T, AppError>;
