//! Salted one-way password hashing.
//!
//! Passwords are stored as Argon2id PHC strings; verification goes through
//! the argon2 verifier, which compares digests in constant time.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;

use crate::error::{Error, Result};

const SALT_LEN: usize = 16;

/// Hash `password` with a fresh random salt.
pub fn hash(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| Error::Credential(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| Error::Credential(e.to_string()))
}

/// Check `password` against a stored PHC string.
///
/// Returns `Ok(false)` on mismatch. A stored value that is not a valid PHC
/// string is an error, not a mismatch.
pub fn verify(password: &str, phc: &str) -> Result<bool> {
    let parsed = PasswordHash::new(phc).map_err(|e| Error::Credential(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
