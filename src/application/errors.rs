use crate::application::ports::account_repository::AccountStoreError;
use crate::application::ports::password_hasher::HashingError;

/// Failures surfaced by the account and auth use cases.
#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(String),
    #[error("account not found")]
    NotFound,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("account number already in use")]
    ConstraintViolation,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("store failure")]
    Store(#[source] anyhow::Error),
    #[error(transparent)]
    Hashing(#[from] HashingError),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }
}

impl From<AccountStoreError> for LedgerError {
    fn from(err: AccountStoreError) -> Self {
        match err {
            AccountStoreError::NotFound => LedgerError::NotFound,
            AccountStoreError::ConstraintViolation => LedgerError::ConstraintViolation,
            AccountStoreError::InsufficientFunds => LedgerError::InsufficientFunds,
            AccountStoreError::InvalidAmount(amount) => {
                LedgerError::Validation(format!("amount must be positive, got {amount}"))
            }
            AccountStoreError::BalanceOverflow => {
                LedgerError::validation("amount would overflow the account balance")
            }
            AccountStoreError::Store(e) => LedgerError::Store(e),
        }
    }
}

pub fn ensure_positive_amount(amount: i64) -> Result<(), LedgerError> {
    if amount <= 0 {
        return Err(LedgerError::validation(format!(
            "amount must be positive, got {amount}"
        )));
    }
    Ok(())
}
