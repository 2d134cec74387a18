//! Convenience result type alias for Prepper Helper.

use crate::error::AppError;

/// A specialized `Result` type for Prepper operations.
pub type AppResult<T> = Result<T, AppError>;
