//! Convenience result type alias for RentBoard.

use crate::error::AppError;

/// A specialized `Result` type for RentBoard operations.
pub type AppResult<T> = Result<T, AppError>;
