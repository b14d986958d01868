#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Signed credentials binding a bearer to one account number.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, account_number: i64) -> Result<String, TokenError>;
    /// Returns the account number the token was issued for.
    fn verify(&self, token: &str) -> Result<i64, TokenError>;
}
