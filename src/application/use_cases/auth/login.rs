use crate::application::errors::LedgerError;
use crate::application::ports::account_repository::{AccountRepository, AccountStoreError};
use crate::application::ports::password_hasher::PasswordHasher;
use crate::application::ports::token_issuer::TokenIssuer;

pub struct Login<'a, R, H, T>
where
    R: AccountRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    pub repo: &'a R,
    pub hasher: &'a H,
    pub tokens: &'a T,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub number: i64,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub number: i64,
}

impl<'a, R, H, T> Login<'a, R, H, T>
where
    R: AccountRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    /// Unknown account numbers and wrong passwords fail identically, and
    /// both pay for one password verification.
    pub async fn execute(&self, req: &LoginRequest) -> Result<LoginOutcome, LedgerError> {
        let account = match self.repo.get_account_by_number(req.number).await {
            Ok(a) => a,
            Err(AccountStoreError::NotFound) => {
                self.hasher.verify_missing(&req.password).await;
                tracing::debug!(number = req.number, "login_rejected");
                return Err(LedgerError::Unauthorized);
            }
            Err(e) => return Err(e.into()),
        };
        if !self
            .hasher
            .verify(&account.encrypted_password, &req.password)
            .await
        {
            tracing::debug!(number = req.number, "login_rejected");
            return Err(LedgerError::Unauthorized);
        }
        let token = self
            .tokens
            .issue(account.number)
            .map_err(|e| LedgerError::Store(e.into()))?;
        Ok(LoginOutcome {
            token,
            number: account.number,
        })
    }
}
