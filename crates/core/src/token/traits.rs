use super::TokenError;

/// Result type for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;

/// Issues access tokens and checks them against stored hashes.
///
/// Plaintext tokens are never stored; only the output of [`TokenAuthority::hash`] is.
pub trait TokenAuthority: Send + Sync {
    /// Produce a random alphanumeric token of `length` characters.
    fn generate(&self, length: usize) -> String;

    /// One-way, salted hash of a token for storage.
    fn hash(&self, token: &str) -> Result<String>;

    /// Check a presented token against a stored hash.
    ///
    /// Returns `false` for a mismatch and for a hash that cannot be parsed.
    fn verify(&self, token: &str, hash: &str) -> bool;
}
