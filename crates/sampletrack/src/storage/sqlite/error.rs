//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError` from
//! `sampletrack_core::storage`. Specific errors are mapped to semantic variants
//! (e.g., PRIMARY KEY constraint to AlreadyExists).

use sampletrack_core::storage::RepositoryError;

const ENTITY: &str = "Sample";

/// Maps a rusqlite error with a known sample ID to a RepositoryError.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_PRIMARYKEY` / `SQLITE_CONSTRAINT_UNIQUE` → `AlreadyExists`
/// - `QueryReturnedNoRows` → `NotFound`
/// - Column decoding failures → `InvalidData`
/// - `CannotOpen` → `ConnectionFailed`
/// - All other errors → `QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error, id: &str) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepositoryError::AlreadyExists {
                entity_type: ENTITY,
                id: id.to_string(),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
            entity_type: ENTITY,
            id: id.to_string(),
        },

        rusqlite::Error::FromSqlConversionFailure(..) | rusqlite::Error::InvalidColumnType(..) => {
            RepositoryError::InvalidData(err.to_string())
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error with a known sample ID to a RepositoryError.
///
/// This is the main entry point for error mapping in async code.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error, id: &str) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err, id),
        tokio_rusqlite::Error::Close(_) | tokio_rusqlite::Error::ConnectionClosed => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    fn constraint(extended_code: std::os::raw::c_int) -> tokio_rusqlite::Error {
        let sqlite_err = ffi::Error {
            code: rusqlite::ErrorCode::ConstraintViolation,
            extended_code,
        };
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, None))
    }

    #[test]
    fn test_primary_key_maps_to_already_exists() {
        let result = map_tokio_rusqlite_error(constraint(ffi::SQLITE_CONSTRAINT_PRIMARYKEY), "abc");

        match result {
            RepositoryError::AlreadyExists { entity_type, id } => {
                assert_eq!(entity_type, "Sample");
                assert_eq!(id, "abc");
            }
            other => panic!("Expected AlreadyExists, got {other:?}"),
        }
    }

    #[test]
    fn test_unique_maps_to_already_exists() {
        let result = map_tokio_rusqlite_error(constraint(ffi::SQLITE_CONSTRAINT_UNIQUE), "abc");
        assert!(matches!(result, RepositoryError::AlreadyExists { .. }));
    }

    #[test]
    fn test_no_rows_maps_to_not_found() {
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows);

        let result = map_tokio_rusqlite_error(err, "abc");

        assert_eq!(result, RepositoryError::sample_not_found("abc"));
    }

    #[test]
    fn test_connection_closed_maps_to_connection_failed() {
        let result = map_tokio_rusqlite_error(tokio_rusqlite::Error::ConnectionClosed, "abc");
        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_other_error_maps_to_query_failed() {
        let err = tokio_rusqlite::Error::Other(Box::new(std::io::Error::other("test error")));

        let result = map_tokio_rusqlite_error(err, "abc");

        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }
}
