//! Password hashing.

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;
use thiserror::Error;

/// Shortest password accepted at registration or on change.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(password_hash::Error),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(password_hash::Error),
}

/// Hash a plain-text password into an argon2 PHC string.
///
/// # Errors
///
/// Returns an error if argon2 fails to produce a hash.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

/// Check a plain-text password against a stored hash.
///
/// A mismatch is `Ok(false)`; only an unreadable hash is an error.
///
/// # Errors
///
/// Returns an error if the stored hash cannot be parsed or verified.
pub fn verify_password(hash: &str, password: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(PasswordError::MalformedHash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(PasswordError::MalformedHash(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies() {
        let hash = hash_password("s3cret-pass").expect("hashing should succeed");

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "s3cret-pass").expect("verify should succeed"));
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let hash = hash_password("s3cret-pass").expect("hashing should succeed");

        assert!(!verify_password(&hash, "other-pass").expect("verify should succeed"));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("not-a-phc-string", "anything").is_err());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("repeat").expect("hashing should succeed");
        let b = hash_password("repeat").expect("hashing should succeed");

        assert_ne!(a, b);
    }
}
