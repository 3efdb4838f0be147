use thiserror::Error;

/// Errors raised when sample input is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Patient pseudonym must be between {min} and {max} characters (got {len})")]
    PseudonymLength { min: usize, max: usize, len: usize },
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Invalid {field}: expected YYYY-MM-DDTHH:MM with optional Z, got {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },
    #[error("Sample ID is required")]
    MissingSampleId,
}
