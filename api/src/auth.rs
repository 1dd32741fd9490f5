//! Credential verification and session tokens.
//!
//! Passwords are stored as `salt$digest` with a per-user random salt, so
//! the account table never holds a directly comparable secret. Session
//! tokens are opaque random strings; the server keeps no session state and
//! logout is an acknowledgement only.

use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;
const TOKEN_LEN: usize = 32;

pub struct PasswordHasher;

impl PasswordHasher {
    pub fn hash(password: &str) -> String {
        let salt: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SALT_LEN)
            .map(char::from)
            .collect();
        let digest = Self::digest(&salt, password);
        format!("{salt}${digest}")
    }

    pub fn verify(password: &str, stored: &str) -> bool {
        let Some((salt, digest)) = stored.split_once('$') else {
            return false;
        };
        Self::digest(salt, password) == digest
    }

    fn digest(salt: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Opaque session identifier returned on login.
pub fn session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let stored = PasswordHasher::hash("hunter2");
        assert!(PasswordHasher::verify("hunter2", &stored));
    }

    #[test]
    fn wrong_password_fails() {
        let stored = PasswordHasher::hash("hunter2");
        assert!(!PasswordHasher::verify("hunter3", &stored));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = PasswordHasher::hash("hunter2");
        let b = PasswordHasher::hash("hunter2");
        assert_ne!(a, b);
        assert!(PasswordHasher::verify("hunter2", &a));
        assert!(PasswordHasher::verify("hunter2", &b));
    }

    #[test]
    fn malformed_stored_value_never_verifies() {
        assert!(!PasswordHasher::verify("hunter2", "no-separator"));
        assert!(!PasswordHasher::verify("hunter2", ""));
    }

    #[test]
    fn session_tokens_are_opaque_and_distinct() {
        let a = session_token();
        let b = session_token();
        assert_eq!(a.len(), TOKEN_LEN);
        assert_ne!(a, b);
    }
}
