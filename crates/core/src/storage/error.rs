use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Shorthand for a missing sample.
    pub fn sample_not_found(id: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            entity_type: "Sample",
            id: id.into(),
        }
    }

    /// Shorthand for a duplicate sample ID.
    pub fn sample_exists(id: impl Into<String>) -> Self {
        RepositoryError::AlreadyExists {
            entity_type: "Sample",
            id: id.into(),
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::sample_not_found("abc-123");
        assert_eq!(error.to_string(), "Sample not found: abc-123");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::sample_exists("Xy12Ab34Cd");
        assert_eq!(error.to_string(), "Sample already exists: Xy12Ab34Cd");
    }

    #[test]
    fn test_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("timeout".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout");
    }

    #[test]
    fn test_query_failed_display() {
        let error = RepositoryError::QueryFailed("syntax error".to_string());
        assert_eq!(error.to_string(), "Query failed: syntax error");
    }
}
