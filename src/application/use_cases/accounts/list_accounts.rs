use crate::application::errors::LedgerError;
use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::account::Account;

pub struct ListAccounts<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AccountRepository + ?Sized> ListAccounts<'a, R> {
    pub async fn execute(&self) -> Result<Vec<Account>, LedgerError> {
        Ok(self.repo.get_accounts().await?)
    }
}
