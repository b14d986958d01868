use crate::application::errors::{LedgerError, ensure_positive_amount};
use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::account::Account;

pub struct Deposit<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AccountRepository + ?Sized> Deposit<'a, R> {
    pub async fn execute(&self, id: i64, amount: i64) -> Result<Account, LedgerError> {
        // a negative deposit would act as an unchecked withdrawal
        ensure_positive_amount(amount)?;
        let account = self.repo.deposit(amount, id).await?;
        tracing::info!(account_id = id, amount, balance = account.balance, "deposit_applied");
        Ok(account)
    }
}
