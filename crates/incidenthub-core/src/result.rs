//! Convenience result type alias for IncidentHub.

use crate::error::AppError;

/// A specialized `Result` type for IncidentHub operations.
///
/// Defined as a convenience so that every crate does not need to write
/// `Result<T, AppError>` explicitly.
pub type AppResult<T> = Result<T, AppError>;
