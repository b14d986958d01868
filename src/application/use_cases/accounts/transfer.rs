use crate::application::errors::{LedgerError, ensure_positive_amount};
use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::account::Account;

pub struct Transfer<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AccountRepository + ?Sized> Transfer<'a, R> {
    /// Moves `amount` out of `from` into the account numbered `to_number`.
    /// Sufficiency of funds is decided by the store inside the transaction,
    /// not from the caller's snapshot of `from`.
    pub async fn execute(
        &self,
        from: &Account,
        to_number: i64,
        amount: i64,
    ) -> Result<(), LedgerError> {
        ensure_positive_amount(amount)?;
        if to_number == from.number {
            return Err(LedgerError::validation(
                "cannot transfer to the same account",
            ));
        }
        self.repo.transfer(amount, to_number, from.id).await?;
        tracing::info!(
            from_account = from.number,
            to_account = to_number,
            amount,
            "transfer_committed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::accounts::account::NewAccount;
    use crate::infrastructure::memory::account_repository_memory::InMemoryAccountRepository;

    async fn two_accounts(repo: &InMemoryAccountRepository) -> (Account, Account) {
        let a = repo
            .create_account(NewAccount::new("Ann", "A", 111_111, "hash".into()))
            .await
            .unwrap();
        let b = repo
            .create_account(NewAccount::new("Bob", "B", 222_222, "hash".into()))
            .await
            .unwrap();
        (a, b)
    }

    #[tokio::test]
    async fn deposit_then_transfer_scenario() {
        let repo = InMemoryAccountRepository::new();
        let (a, b) = two_accounts(&repo).await;
        repo.deposit(100, a.id).await.unwrap();

        Transfer { repo: &repo }.execute(&a, b.number, 40).await.unwrap();

        assert_eq!(repo.get_account_by_id(a.id).await.unwrap().balance, 60);
        assert_eq!(repo.get_account_by_id(b.id).await.unwrap().balance, 40);
    }

    #[tokio::test]
    async fn stale_snapshot_does_not_bypass_funds_check() {
        let repo = InMemoryAccountRepository::new();
        let (a, b) = two_accounts(&repo).await;
        let snapshot = repo.deposit(50, a.id).await.unwrap();
        repo.transfer(50, b.number, a.id).await.unwrap();

        let err = Transfer { repo: &repo }
            .execute(&snapshot, b.number, 50)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds));
        assert_eq!(repo.get_account_by_id(a.id).await.unwrap().balance, 0);
        assert_eq!(repo.get_account_by_id(b.id).await.unwrap().balance, 50);
    }

    #[tokio::test]
    async fn rejects_self_transfer_and_bad_amounts() {
        let repo = InMemoryAccountRepository::new();
        let (a, b) = two_accounts(&repo).await;
        repo.deposit(10, a.id).await.unwrap();
        let uc = Transfer { repo: &repo };
        assert!(matches!(
            uc.execute(&a, a.number, 5).await,
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            uc.execute(&a, b.number, 0).await,
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            uc.execute(&a, b.number, -5).await,
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            uc.execute(&a, 999_999, 5).await,
            Err(LedgerError::NotFound)
        ));
        assert_eq!(repo.get_account_by_id(a.id).await.unwrap().balance, 10);
    }
}
