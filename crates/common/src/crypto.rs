//! Password hashing for locally stored accounts.
//!
//! Passwords are stored as argon2 PHC strings (`$argon2id$v=19$...`), which
//! carry their own salt and parameters. Plaintext never reaches the store.
//!
//! # Examples
//!
//! ```
//! use tvk_common::crypto::{hash_password, verify_password};
//!
//! let hash = hash_password("vikravandi-2024").expect("hashing succeeds");
//! assert!(hash.starts_with("$argon2"));
//! assert!(verify_password("vikravandi-2024", &hash).expect("valid hash"));
//! assert!(!verify_password("wrong", &hash).expect("valid hash"));
//! ```

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::{AppError, AppResult};

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a stored hash.
///
/// Returns `Ok(false)` on mismatch; an unparseable stored hash is an error.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();

        assert_ne!(a, b);
        assert!(verify_password("same-password", &a).unwrap());
        assert!(verify_password("same-password", &b).unwrap());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("correct horse").unwrap();
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_plaintext_stored_value_is_an_error() {
        assert!(verify_password("admin123", "admin123").is_err());
    }
}
