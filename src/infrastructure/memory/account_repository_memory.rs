use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::account_repository::{AccountRepository, AccountStoreError};
use crate::domain::accounts::account::{Account, NewAccount};

#[derive(Default)]
struct State {
    next_id: i64,
    accounts: BTreeMap<i64, Account>,
}

/// Process-local account store. Every operation runs under one lock, which
/// makes transfers trivially atomic.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    state: Mutex<State>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State {
    fn id_for_number(&self, number: i64) -> Option<i64> {
        self.accounts
            .values()
            .find(|a| a.number == number)
            .map(|a| a.id)
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create_account(&self, account: NewAccount) -> Result<Account, AccountStoreError> {
        let mut state = self.state.lock().await;
        if state.id_for_number(account.number).is_some() {
            return Err(AccountStoreError::ConstraintViolation);
        }
        state.next_id += 1;
        let created = account.into_account(state.next_id);
        state.accounts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Account, AccountStoreError> {
        let state = self.state.lock().await;
        state
            .accounts
            .get(&id)
            .cloned()
            .ok_or(AccountStoreError::NotFound)
    }

    async fn get_account_by_number(&self, number: i64) -> Result<Account, AccountStoreError> {
        let state = self.state.lock().await;
        state
            .accounts
            .values()
            .find(|a| a.number == number)
            .cloned()
            .ok_or(AccountStoreError::NotFound)
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, AccountStoreError> {
        let state = self.state.lock().await;
        Ok(state.accounts.values().cloned().collect())
    }

    async fn delete_account(&self, id: i64) -> Result<(), AccountStoreError> {
        let mut state = self.state.lock().await;
        state
            .accounts
            .remove(&id)
            .map(|_| ())
            .ok_or(AccountStoreError::NotFound)
    }

    async fn deposit(&self, amount: i64, id: i64) -> Result<Account, AccountStoreError> {
        if amount <= 0 {
            return Err(AccountStoreError::InvalidAmount(amount));
        }
        let mut state = self.state.lock().await;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or(AccountStoreError::NotFound)?;
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(AccountStoreError::BalanceOverflow)?;
        Ok(account.clone())
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
        let mut state = self.state.lock().await;
        let from_balance = state
            .accounts
            .get(&from_id)
            .map(|a| a.balance)
            .ok_or(AccountStoreError::NotFound)?;
        let to_id = state
            .id_for_number(to_number)
            .ok_or(AccountStoreError::NotFound)?;
        if from_balance < amount {
            return Err(AccountStoreError::InsufficientFunds);
        }
        if to_id == from_id {
            return Ok(());
        }
        let credited = state.accounts[&to_id]
            .balance
            .checked_add(amount)
            .ok_or(AccountStoreError::BalanceOverflow)?;
        // both legs validated above; nothing below can fail
        if let Some(from) = state.accounts.get_mut(&from_id) {
            from.balance = from_balance - amount;
        }
        if let Some(to) = state.accounts.get_mut(&to_id) {
            to.balance = credited;
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AccountStoreError> {
        Ok(())
    }
}
