use crate::application::errors::LedgerError;
use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::account::Account;

pub struct DeleteAccount<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AccountRepository + ?Sized> DeleteAccount<'a, R> {
    /// Hard-deletes account `id` and returns the record as it was just before
    /// removal.
    pub async fn execute(&self, id: i64) -> Result<Account, LedgerError> {
        let account = self.repo.get_account_by_id(id).await?;
        self.repo.delete_account(id).await?;
        tracing::info!(account_id = id, number = account.number, "account_deleted");
        Ok(account)
    }
}
