//! Cryptographic utilities shared across Huddle crates
//!
//! Provides password hashing via Argon2, opaque session-token generation
//! and digesting via SHA-256, and random password material for the
//! forgot-password flow.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordVerifier};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Number of random bytes backing a session token
const SESSION_TOKEN_BYTES: usize = 32;

/// Hash a plaintext password with Argon2id and a random salt.
///
/// The returned string is in PHC format and can be verified with
/// [`verify_password`].
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-format hash.
///
/// Malformed stored hashes verify as false rather than erroring, so a
/// corrupt row cannot be distinguished from a wrong password by a caller.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Generate a new opaque session token.
///
/// The raw token goes to the client; only its SHA-256 digest
/// (see [`hash_session_token`]) is persisted.
pub fn generate_session_token() -> String {
    let bytes: [u8; SESSION_TOKEN_BYTES] = rand::thread_rng().gen();
    format!("hs_{}", hex::encode(bytes))
}

/// Digest a session token for storage and lookup.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate a random alphanumeric password for the forgot-password flow.
pub fn generate_random_password(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("secret123").unwrap();
        let b = hash_password("secret123").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("secret123", &a));
        assert!(verify_password("secret123", &b));
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        assert!(!verify_password("anything", "not-a-phc-hash"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn test_session_token_shape_and_uniqueness() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert!(a.starts_with("hs_"));
        assert_eq!(a.len(), 3 + SESSION_TOKEN_BYTES * 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_session_token_digest_is_deterministic() {
        let token = generate_session_token();
        assert_eq!(hash_session_token(&token), hash_session_token(&token));
        assert_ne!(
            hash_session_token(&token),
            hash_session_token("hs_something_else")
        );
        // SHA-256 hex digest
        assert_eq!(hash_session_token(&token).len(), 64);
    }

    #[test]
    fn test_random_password_length_and_charset() {
        let password = generate_random_password(12);
        assert_eq!(password.len(), 12);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));

        let other = generate_random_password(12);
        assert_ne!(password, other);
    }
}
