use chrono::{DateTime, Utc};

/// Smallest and largest public account numbers handed out at creation.
pub const MIN_ACCOUNT_NUMBER: i64 = 100_000;
pub const MAX_ACCOUNT_NUMBER: i64 = 999_999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub encrypted_password: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

/// Everything the store needs to insert an account; `id` is assigned on insert
/// and the balance always starts at zero.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub encrypted_password: String,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    pub fn new(first_name: &str, last_name: &str, number: i64, encrypted_password: String) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            number,
            encrypted_password,
            created_at: Utc::now(),
        }
    }

    pub fn into_account(self, id: i64) -> Account {
        Account {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            number: self.number,
            encrypted_password: self.encrypted_password,
            balance: 0,
            created_at: self.created_at,
        }
    }
}
