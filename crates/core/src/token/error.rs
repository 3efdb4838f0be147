use thiserror::Error;

/// Errors from token hashing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("failed to hash token: {0}")]
    Hashing(String),
}
