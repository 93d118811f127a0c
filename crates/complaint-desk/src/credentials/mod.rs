//! Salted password hashing and verification.
//!
//! A stored secret is `base64(salt || derived_key)` where the key is PBKDF2-HMAC-SHA256 over the
//! password. Verification re-derives with the embedded salt and compares in constant time.

use std::fmt;
use std::num::NonZeroU32;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use tracing::debug;

pub const SALT_LEN: usize = 32;
pub const DERIVED_KEY_LEN: usize = 64;
pub const PBKDF2_ITERATIONS: u32 = 10_000;

const ITERATIONS: NonZeroU32 = match NonZeroU32::new(PBKDF2_ITERATIONS) {
    Some(iterations) => iterations,
    None => panic!("iteration count must be non-zero"),
};

/// Encoded salt and derived key stored in place of a plaintext password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordSecret(String);

impl PasswordSecret {
    /// Wrap a secret previously produced by [`hash_password`] and read back from storage.
    pub fn from_stored(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn verify(&self, password: &str) -> bool {
        verify_password(password, &self.0)
    }
}

impl fmt::Debug for PasswordSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordSecret(<redacted>)")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("system random number generator unavailable")]
    RandomUnavailable,
}

/// Hash `password` under a fresh random salt.
///
/// Minimum password length is a registration rule and is not checked here.
pub fn hash_password(password: &str) -> Result<PasswordSecret, CredentialError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| CredentialError::RandomUnavailable)?;

    let mut combined = [0u8; SALT_LEN + DERIVED_KEY_LEN];
    combined[..SALT_LEN].copy_from_slice(&salt);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        ITERATIONS,
        &salt,
        password.as_bytes(),
        &mut combined[SALT_LEN..],
    );

    Ok(PasswordSecret(STANDARD.encode(combined)))
}

/// Check `password` against an encoded secret. Malformed secrets verify as `false`.
pub fn verify_password(password: &str, secret: &str) -> bool {
    let combined = match STANDARD.decode(secret.trim()) {
        Ok(bytes) => bytes,
        Err(_) => {
            debug!("password secret is not valid base64");
            return false;
        }
    };

    if combined.len() != SALT_LEN + DERIVED_KEY_LEN {
        debug!(length = combined.len(), "password secret has unexpected length");
        return false;
    }

    let (salt, stored_key) = combined.split_at(SALT_LEN);
    pbkdf2::verify(
        pbkdf2::PBKDF2_HMAC_SHA256,
        ITERATIONS,
        salt,
        password.as_bytes(),
        stored_key,
    )
    .is_ok()
}
