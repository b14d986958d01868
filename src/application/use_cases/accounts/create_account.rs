use crate::application::errors::LedgerError;
use crate::application::ports::account_number_generator::AccountNumberGenerator;
use crate::application::ports::account_repository::{AccountRepository, AccountStoreError};
use crate::application::ports::password_hasher::PasswordHasher;
use crate::domain::accounts::account::{Account, NewAccount};

/// Fresh numbers tried before a collision is reported to the caller.
pub const MAX_NUMBER_ATTEMPTS: usize = 5;

const MAX_NAME_LEN: usize = 100;
const MAX_PASSWORD_LEN: usize = 256;

pub struct CreateAccount<'a, R, N, H>
where
    R: AccountRepository + ?Sized,
    N: AccountNumberGenerator + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub repo: &'a R,
    pub numbers: &'a N,
    pub hasher: &'a H,
}

#[derive(Debug, Clone)]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl<'a, R, N, H> CreateAccount<'a, R, N, H>
where
    R: AccountRepository + ?Sized,
    N: AccountNumberGenerator + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub async fn execute(&self, req: &CreateAccountRequest) -> Result<Account, LedgerError> {
        validate_name("firstName", &req.first_name)?;
        validate_name("lastName", &req.last_name)?;
        if req.password.is_empty() {
            return Err(LedgerError::validation("password is required"));
        }
        if req.password.len() > MAX_PASSWORD_LEN {
            return Err(LedgerError::validation(format!(
                "password must be at most {MAX_PASSWORD_LEN} bytes"
            )));
        }

        let encrypted = self.hasher.hash(&req.password).await?;

        for attempt in 1..=MAX_NUMBER_ATTEMPTS {
            let number = self.numbers.next_number();
            let new_account =
                NewAccount::new(&req.first_name, &req.last_name, number, encrypted.clone());
            match self.repo.create_account(new_account).await {
                Ok(account) => return Ok(account),
                Err(AccountStoreError::ConstraintViolation) => {
                    tracing::debug!(number, attempt, "account_number_collision");
                }
                Err(e) => return Err(e.into()),
            }
        }
        tracing::warn!(
            attempts = MAX_NUMBER_ATTEMPTS,
            "account_number_generation_exhausted"
        );
        Err(LedgerError::ConstraintViolation)
    }
}

fn validate_name(field: &str, value: &str) -> Result<(), LedgerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(LedgerError::validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}
