use rand::{distr::Alphanumeric, Rng};

/// Length of the access token handed out at creation.
pub const DEFAULT_TOKEN_LENGTH: usize = 16;

/// Length of generated sample identifiers.
pub const DEFAULT_SAMPLE_ID_LENGTH: usize = 10;

/// Generate a cryptographically random alphanumeric token of `length` characters.
///
/// Draws from the thread-local CSPRNG, which is seeded from the OS.
pub fn generate_token(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Generate a random alphanumeric sample identifier.
pub fn generate_sample_id(length: usize) -> String {
    generate_token(length)
}
