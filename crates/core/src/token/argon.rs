//! Token hashing and verification using argon2id.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use super::functions::generate_token;
use super::traits::{Result, TokenAuthority};
use super::TokenError;

/// [`TokenAuthority`] backed by argon2id with a random salt per token.
#[derive(Debug, Clone, Default)]
pub struct Argon2Authority {
    params: Params,
}

impl Argon2Authority {
    /// Uses the argon2 crate's recommended default cost.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses explicit cost parameters (memory in KiB, iterations, lanes).
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| TokenError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl TokenAuthority for Argon2Authority {
    fn generate(&self, length: usize) -> String {
        generate_token(length)
    }

    fn hash(&self, token: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher()
            .hash_password(token.as_bytes(), &salt)
            .map_err(|e| TokenError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, token: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored token hash could not be parsed");
                return false;
            }
        };
        // Cost parameters come from the stored hash, not from `self.params`.
        self.hasher()
            .verify_password(token.as_bytes(), &parsed)
            .is_ok()
    }
}
