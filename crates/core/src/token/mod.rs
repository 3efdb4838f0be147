mod argon;
mod error;
mod functions;
mod traits;

pub use argon::Argon2Authority;
pub use error::TokenError;
pub use functions::{generate_sample_id, generate_token, DEFAULT_SAMPLE_ID_LENGTH, DEFAULT_TOKEN_LENGTH};
pub use traits::{Result, TokenAuthority};
