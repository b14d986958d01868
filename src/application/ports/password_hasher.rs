use async_trait::async_trait;

#[derive(thiserror::Error, Debug)]
#[error("failed to hash password: {0}")]
pub struct HashingError(pub String);

/// Salted, deliberately slow one-way password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, HashingError>;
    /// A malformed `encoded` hash verifies as false.
    async fn verify(&self, encoded: &str, password: &str) -> bool;
    /// Spends the work of one failed verification. Used when there is no
    /// stored hash to check, so a missing account costs as much as a wrong
    /// password.
    async fn verify_missing(&self, password: &str);
}
