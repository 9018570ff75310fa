//! Convenience result type alias for foldertree.

use crate::error::AppError;

/// A specialized `Result` type for foldertree operations.
///
/// Repository adapters return this so that storage failures travel
/// through the service layer unchanged.
pub type AppResult<T> = Result<T, AppError>;
