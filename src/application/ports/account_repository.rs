use async_trait::async_trait;

use crate::domain::accounts::account::{Account, NewAccount};

#[derive(thiserror::Error, Debug)]
pub enum AccountStoreError {
    #[error("account not found")]
    NotFound,
    #[error("account number already in use")]
    ConstraintViolation,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("invalid amount {0}")]
    InvalidAmount(i64),
    #[error("balance would overflow")]
    BalanceOverflow,
    #[error("store failure")]
    Store(#[source] anyhow::Error),
}

/// Persistence for accounts. Implementations own the account state; callers
/// only ever hold request-scoped copies.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create_account(&self, account: NewAccount) -> Result<Account, AccountStoreError>;
    async fn get_account_by_id(&self, id: i64) -> Result<Account, AccountStoreError>;
    async fn get_account_by_number(&self, number: i64) -> Result<Account, AccountStoreError>;
    async fn get_accounts(&self) -> Result<Vec<Account>, AccountStoreError>;
    async fn delete_account(&self, id: i64) -> Result<(), AccountStoreError>;
    /// Adds `amount` to the balance of account `id` and returns the updated row.
    async fn deposit(&self, amount: i64, id: i64) -> Result<Account, AccountStoreError>;
    /// Moves `amount` from account `from_id` to the account numbered
    /// `to_number` in a single transaction. Nothing changes unless both legs
    /// succeed.
    async fn transfer(
        &self,
        amount: i64,
        to_number: i64,
        from_id: i64,
    ) -> Result<(), AccountStoreError>;
    async fn ping(&self) -> Result<(), AccountStoreError>;
}
