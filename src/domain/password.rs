//! Password Hashing — Salted Argon2id
//!
//! The portal previously stored a rolling integer hash of the password,
//! which is trivially brute-forceable. Records now carry a PHC-format
//! Argon2id string with a per-password random salt.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHash};

use super::error::StoreError;

/// Hash a password with a fresh random salt.
///
/// Returns the PHC string (`$argon2id$v=19$...`) stored in
/// `UserRecord::password_hash`.
pub fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::Hash(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// Verify a password against a stored PHC string.
///
/// A malformed stored hash counts as a mismatch rather than an error:
/// legacy records hashed by the old scheme must simply fail to log in.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
