use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgRow;
use sqlx::{Connection, Postgres, Row};

use crate::application::ports::account_repository::{AccountRepository, AccountStoreError};
use crate::domain::accounts::account::{Account, NewAccount};
use crate::infrastructure::db::PgPool;

const ACCOUNT_COLUMNS: &str =
    "id, first_name, last_name, number, encrypted_password, balance, created_at";

impl From<sqlx::Error> for AccountStoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return AccountStoreError::ConstraintViolation;
            }
            // accounts_balance_non_negative
            if db.is_check_violation() {
                return AccountStoreError::InsufficientFunds;
            }
            // numeric_value_out_of_range: balance + amount exceeds BIGINT
            if db.code().as_deref() == Some("22003") {
                return AccountStoreError::BalanceOverflow;
            }
        }
        if matches!(err, sqlx::Error::RowNotFound) {
            return AccountStoreError::NotFound;
        }
        AccountStoreError::Store(err.into())
    }
}

/// PostgreSQL account store.
///
/// Reads run under a client-side deadline. Writes only bound the wait for a
/// connection on the client; the statements themselves are bounded by the
/// server's `statement_timeout` (see [`crate::infrastructure::db::connect_pool`]),
/// so a write that times out is rolled back rather than committed behind an
/// error.
pub struct SqlxAccountRepository {
    pub pool: PgPool,
    timeout: Duration,
}

impl SqlxAccountRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn with_deadline<T, F>(&self, fut: F) -> Result<T, AccountStoreError>
    where
        F: Future<Output = Result<T, AccountStoreError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => res,
            Err(_) => Err(AccountStoreError::Store(anyhow::anyhow!(
                "store call exceeded {:?}",
                self.timeout
            ))),
        }
    }

    async fn acquire(&self) -> Result<PoolConnection<Postgres>, AccountStoreError> {
        self.with_deadline(async { Ok(self.pool.acquire().await?) })
            .await
    }
}

fn row_to_account(r: &PgRow) -> Account {
    Account {
        id: r.get("id"),
        first_name: r.get("first_name"),
        last_name: r.get("last_name"),
        number: r.get("number"),
        encrypted_password: r.get("encrypted_password"),
        balance: r.get("balance"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl AccountRepository for SqlxAccountRepository {
    async fn create_account(&self, account: NewAccount) -> Result<Account, AccountStoreError> {
        let mut conn = self.acquire().await?;
        let row = sqlx::query(&format!(
            r#"INSERT INTO accounts (first_name, last_name, number, encrypted_password, balance, created_at)
               VALUES ($1, $2, $3, $4, 0, $5)
               RETURNING {ACCOUNT_COLUMNS}"#
        ))
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.number)
        .bind(&account.encrypted_password)
        .bind(account.created_at)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row_to_account(&row))
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Account, AccountStoreError> {
        self.with_deadline(async {
            let row = sqlx::query(&format!(
                "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            row.as_ref()
                .map(row_to_account)
                .ok_or(AccountStoreError::NotFound)
        })
        .await
    }

    async fn get_account_by_number(&self, number: i64) -> Result<Account, AccountStoreError> {
        self.with_deadline(async {
            let row = sqlx::query(&format!(
                "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE number = $1"
            ))
            .bind(number)
            .fetch_optional(&self.pool)
            .await?;
            row.as_ref()
                .map(row_to_account)
                .ok_or(AccountStoreError::NotFound)
        })
        .await
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, AccountStoreError> {
        self.with_deadline(async {
            let rows = sqlx::query(&format!(
                "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY id"
            ))
            .fetch_all(&self.pool)
            .await?;
            Ok(rows.iter().map(row_to_account).collect())
        })
        .await
    }

    async fn delete_account(&self, id: i64) -> Result<(), AccountStoreError> {
        let mut conn = self.acquire().await?;
        let res = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if res.rows_affected() == 0 {
            return Err(AccountStoreError::NotFound);
        }
        Ok(())
    }

    async fn deposit(&self, amount: i64, id: i64) -> Result<Account, AccountStoreError> {
        if amount <= 0 {
            return Err(AccountStoreError::InvalidAmount(amount));
        }
        let mut conn = self.acquire().await?;
        let row = sqlx::query(&format!(
            "UPDATE accounts SET balance = balance + $1 WHERE id = $2 RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(amount)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        row.as_ref()
            .map(row_to_account)
            .ok_or(AccountStoreError::NotFound)
    }

    async fn transfer(
        &self,
        amount: i64,
        to_number: i64,
        from_id: i64,
    ) -> Result<(), AccountStoreError> {
        if amount <= 0 {
            return Err(AccountStoreError::InvalidAmount(amount));
        }
        let mut conn = self.acquire().await?;
        let mut tx = conn.begin().await?;
        // Both rows are locked in id order so opposite transfers cannot deadlock.
        let rows = sqlx::query(
            "SELECT id, number, balance FROM accounts WHERE id = $1 OR number = $2 ORDER BY id FOR UPDATE",
        )
        .bind(from_id)
        .bind(to_number)
        .fetch_all(&mut *tx)
        .await?;

        let source = rows.iter().find(|r| r.get::<i64, _>("id") == from_id);
        let target_found = rows.iter().any(|r| r.get::<i64, _>("number") == to_number);
        let Some(source) = source else {
            tx.rollback().await.ok();
            return Err(AccountStoreError::NotFound);
        };
        if !target_found {
            tx.rollback().await.ok();
            return Err(AccountStoreError::NotFound);
        }
        let balance: i64 = source.get("balance");
        if balance < amount {
            tx.rollback().await.ok();
            return Err(AccountStoreError::InsufficientFunds);
        }

        sqlx::query("UPDATE accounts SET balance = balance - $1 WHERE id = $2")
            .bind(amount)
            .bind(from_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE accounts SET balance = balance + $1 WHERE number = $2")
            .bind(amount)
            .bind(to_number)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AccountStoreError> {
        self.with_deadline(async {
            sqlx::query_scalar::<_, i32>("SELECT 1")
                .fetch_one(&self.pool)
                .await?;
            Ok(())
        })
        .await
    }
}

// These run against a real database:
//   DATABASE_URL=postgres://... cargo test -- --ignored
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::account_number_generator::AccountNumberGenerator;
    use crate::infrastructure::db::{connect_pool, migrate};
    use crate::infrastructure::numbers::RandomAccountNumbers;

    async fn repo() -> SqlxAccountRepository {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let timeout = Duration::from_secs(5);
        let pool = connect_pool(&url, 10, timeout).await.unwrap();
        migrate(&pool).await.unwrap();
        SqlxAccountRepository::new(pool, timeout)
    }

    /// Creates an account under a fresh random number, retrying on the rare
    /// clash with rows left by earlier runs.
    async fn open(repo: &SqlxAccountRepository, balance: i64) -> Account {
        loop {
            let number = RandomAccountNumbers.next_number();
            match repo
                .create_account(NewAccount::new("Test", "Holder", number, "hash".into()))
                .await
            {
                Ok(acc) if balance > 0 => return repo.deposit(balance, acc.id).await.unwrap(),
                Ok(acc) => return acc,
                Err(AccountStoreError::ConstraintViolation) => continue,
                Err(e) => panic!("create_account failed: {e:?}"),
            }
        }
    }

    async fn balance_of(repo: &SqlxAccountRepository, id: i64) -> i64 {
        repo.get_account_by_id(id).await.unwrap().balance
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL at DATABASE_URL
    async fn transfer_moves_funds() {
        let repo = repo().await;
        let a = open(&repo, 100).await;
        let b = open(&repo, 0).await;
        repo.transfer(40, b.number, a.id).await.unwrap();
        assert_eq!(balance_of(&repo, a.id).await, 60);
        assert_eq!(balance_of(&repo, b.id).await, 40);
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL at DATABASE_URL
    async fn overdraft_leaves_both_rows_untouched() {
        let repo = repo().await;
        let a = open(&repo, 30).await;
        let b = open(&repo, 5).await;
        let err = repo.transfer(31, b.number, a.id).await.unwrap_err();
        assert!(matches!(err, AccountStoreError::InsufficientFunds));
        assert_eq!(balance_of(&repo, a.id).await, 30);
        assert_eq!(balance_of(&repo, b.id).await, 5);
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL at DATABASE_URL
    async fn missing_source_or_target_changes_nothing() {
        let repo = repo().await;
        let a = open(&repo, 30).await;
        // generated numbers are never below 100000
        let err = repo.transfer(10, 42, a.id).await.unwrap_err();
        assert!(matches!(err, AccountStoreError::NotFound));
        let err = repo.transfer(10, a.number, -1).await.unwrap_err();
        assert!(matches!(err, AccountStoreError::NotFound));
        assert_eq!(balance_of(&repo, a.id).await, 30);
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL at DATABASE_URL
    async fn duplicate_number_is_a_constraint_violation() {
        let repo = repo().await;
        let a = open(&repo, 0).await;
        let err = repo
            .create_account(NewAccount::new("Other", "Person", a.number, "hash".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountStoreError::ConstraintViolation));
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL at DATABASE_URL
    async fn negative_balance_is_refused_by_the_schema() {
        let repo = repo().await;
        let a = open(&repo, 10).await;
        let err: AccountStoreError = sqlx::query("UPDATE accounts SET balance = -1 WHERE id = $1")
            .bind(a.id)
            .execute(&repo.pool)
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, AccountStoreError::InsufficientFunds));
        assert_eq!(balance_of(&repo, a.id).await, 10);
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL at DATABASE_URL
    async fn overflowing_deposit_is_reported_and_rolled_back() {
        let repo = repo().await;
        let a = open(&repo, i64::MAX).await;
        let err = repo.deposit(1, a.id).await.unwrap_err();
        assert!(matches!(err, AccountStoreError::BalanceOverflow));
        assert_eq!(balance_of(&repo, a.id).await, i64::MAX);
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL at DATABASE_URL
    async fn delete_is_hard_and_reports_missing() {
        let repo = repo().await;
        let a = open(&repo, 0).await;
        repo.delete_account(a.id).await.unwrap();
        assert!(matches!(
            repo.get_account_by_id(a.id).await,
            Err(AccountStoreError::NotFound)
        ));
        assert!(matches!(
            repo.delete_account(a.id).await,
            Err(AccountStoreError::NotFound)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ignore] // Requires PostgreSQL at DATABASE_URL
    async fn opposite_concurrent_transfers_conserve_total() {
        let repo = Arc::new(repo().await);
        let a = open(&repo, 100).await;
        let b = open(&repo, 100).await;

        let mut handles = Vec::new();
        for i in 0..40i64 {
            let repo = repo.clone();
            let (from_id, to_number) = if i % 2 == 0 {
                (a.id, b.number)
            } else {
                (b.id, a.number)
            };
            let amount = i % 9 + 1;
            handles.push(tokio::spawn(async move {
                match repo.transfer(amount, to_number, from_id).await {
                    Ok(()) | Err(AccountStoreError::InsufficientFunds) => {}
                    Err(e) => panic!("unexpected transfer failure: {e:?}"),
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let (a_bal, b_bal) = (balance_of(&repo, a.id).await, balance_of(&repo, b.id).await);
        assert!(a_bal >= 0 && b_bal >= 0);
        assert_eq!(a_bal + b_bal, 200);
    }
}
