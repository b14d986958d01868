use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
};
use async_trait::async_trait;
use password_hash::rand_core::OsRng;

use crate::application::ports::password_hasher::{HashingError, PasswordHasher};

/// Well-formed Argon2id PHC string with default parameters that no password
/// matches. Verifying against it costs a full hash.
const DECOY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$dW5rbm93bi1hY2NvdW50IQ$AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8";

/// Hashes `password` with Argon2 and a fresh random salt. The result is a PHC
/// string carrying algorithm, parameters and salt.
pub fn hash_password(password: &str) -> Result<String, HashingError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| HashingError(e.to_string()))
}

/// A malformed `encoded` hash verifies as false.
pub fn verify_password(encoded: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(encoded) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Argon2 on the blocking pool; hashing is deliberately slow.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, HashingError> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| HashingError(e.to_string()))?
    }

    async fn verify(&self, encoded: &str, password: &str) -> bool {
        let (encoded, password) = (encoded.to_owned(), password.to_owned());
        tokio::task::spawn_blocking(move || verify_password(&encoded, &password))
            .await
            .unwrap_or(false)
    }

    async fn verify_missing(&self, password: &str) {
        self.verify(DECOY_HASH, password).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_original_password_only() {
        let hash = hash_password("password123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(!hash.contains("password123"));
        assert!(verify_password(&hash, "password123"));
        assert!(!verify_password(&hash, "password124"));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("hunter2").unwrap();
        let b = hash_password("hunter2").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        assert!(!verify_password("", "anything"));
        assert!(!verify_password("not-a-phc-string", "anything"));
        assert!(!verify_password("$argon2id$v=19$garbage", "anything"));
    }

    #[test]
    fn decoy_hash_parses_with_default_params() {
        // an unparseable decoy would return early and skip the hashing work
        let parsed = PasswordHash::new(DECOY_HASH).unwrap();
        assert_eq!(parsed.algorithm.as_str(), "argon2id");
        let defaults = hash_password("x").unwrap();
        let defaults = PasswordHash::new(&defaults).unwrap();
        assert_eq!(parsed.params.to_string(), defaults.params.to_string());
        assert!(!verify_password(DECOY_HASH, "password123"));
    }

    #[tokio::test]
    async fn hasher_agrees_with_sync_functions() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("s3cret").await.unwrap();
        assert!(hasher.verify(&hash, "s3cret").await);
        assert!(!hasher.verify(&hash, "S3cret").await);
        assert!(verify_password(&hash, "s3cret"));
    }
}
