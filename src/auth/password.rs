//! Password hashing and verification.
//!
//! Thin wrappers over bcrypt: `hash` salts and hashes a raw password before
//! it is stored, `verify` checks a login attempt against the stored hash.
//! Raw passwords never leave this boundary in any other form.

use bcrypt::{hash as bcrypt_hash, verify as bcrypt_verify, BcryptError, DEFAULT_COST};

/// Hash a raw password with a fresh salt.
pub fn hash(password: &str) -> Result<String, BcryptError> {
    bcrypt_hash(password, DEFAULT_COST)
}

/// Verify a raw password against a stored hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is
/// malformed.
pub fn verify(password: &str, stored_hash: &str) -> Result<bool, BcryptError> {
    bcrypt_verify(password, stored_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_round_trip() {
        let hashed = hash("correct horse battery staple").unwrap();
        assert!(verify("correct horse battery staple", &hashed).unwrap());
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let hashed = hash("password123").unwrap();
        assert!(!verify("password124", &hashed).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash("same input").unwrap();
        let second = hash("same input").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify("anything", "not-a-bcrypt-hash").is_err());
    }
}
