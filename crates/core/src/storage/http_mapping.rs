//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
/// - `InvalidData` -> 500 (Internal Server Error)
///
/// `InvalidData` comes from rows the backend could not decode, so it is a
/// server-side fault rather than a bad request.
///
/// # Examples
///
/// ```
/// use sampletrack_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::sample_not_found("abc-123");
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 500,
    }
}
