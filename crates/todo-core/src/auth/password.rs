//! Password hashing
//!
//! Digests are deterministic for a given salt so that a login can look the
//! user up by `(username, digest)` without ever handling the plaintext again.

use sha2::{Digest, Sha256};

/// Salted SHA-256 password hasher
#[derive(Clone)]
pub struct PasswordHasher {
    salt: String,
}

impl PasswordHasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Hash a password into its lowercase hex digest
    pub fn hash(&self, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(password.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let hasher = PasswordHasher::new("pepper");
        assert_eq!(hasher.hash("secret1"), hasher.hash("secret1"));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hasher = PasswordHasher::new("pepper");
        let digest = hasher.hash("secret1");
        assert_ne!(digest, "secret1");
        assert!(!digest.contains("secret1"));
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_differs_per_password() {
        let hasher = PasswordHasher::new("pepper");
        assert_ne!(hasher.hash("secret1"), hasher.hash("secret2"));
    }

    #[test]
    fn test_hash_depends_on_salt() {
        let a = PasswordHasher::new("pepper");
        let b = PasswordHasher::new("paprika");
        assert_ne!(a.hash("secret1"), b.hash("secret1"));
    }

    #[test]
    fn test_hash_empty_and_unicode_passwords() {
        let hasher = PasswordHasher::new("pepper");
        assert_eq!(hasher.hash("").len(), 64);
        assert_ne!(hasher.hash("密碼測試🔐"), hasher.hash("密碼測試"));
    }

    #[test]
    fn test_known_digest() {
        // sha256("") with an empty salt
        let hasher = PasswordHasher::new("");
        assert_eq!(
            hasher.hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
