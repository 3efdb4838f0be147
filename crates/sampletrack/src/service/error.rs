use thiserror::Error;

use sampletrack_core::sample::ValidationError;
use sampletrack_core::storage::RepositoryError;
use sampletrack_core::token::TokenError;

/// Errors returned by [`super::SampleService`].
///
/// An unknown ID is always `NotFound` and a rejected token always
/// `Unauthorized`; neither is reported as the other.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Specified resource was not found.")]
    NotFound,

    #[error("Unauthorized access requested")]
    Unauthorized,

    #[error("Sample already exists: {0}")]
    Conflict(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Storage(RepositoryError),

    #[error("Storage call timed out")]
    Timeout,

    #[error("Update task failed: {0}")]
    Task(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => ServiceError::NotFound,
            RepositoryError::AlreadyExists { id, .. } => ServiceError::Conflict(id),
            other => ServiceError::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_from_repository() {
        let err = ServiceError::from(RepositoryError::sample_not_found("abc"));
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[test]
    fn test_conflict_from_repository() {
        let err = ServiceError::from(RepositoryError::sample_exists("abc"));
        assert!(matches!(err, ServiceError::Conflict(id) if id == "abc"));
    }

    #[test]
    fn test_other_repository_errors_are_storage() {
        let err = ServiceError::from(RepositoryError::QueryFailed("boom".to_string()));
        assert!(matches!(err, ServiceError::Storage(_)));
        assert_eq!(err.to_string(), "Query failed: boom");
    }

    #[test]
    fn test_public_messages() {
        assert_eq!(
            ServiceError::NotFound.to_string(),
            "Specified resource was not found."
        );
        assert_eq!(
            ServiceError::Unauthorized.to_string(),
            "Unauthorized access requested"
        );
    }
}
