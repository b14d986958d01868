use crate::application::ports::account_repository::AccountRepository;
use crate::application::ports::token_issuer::TokenIssuer;
use crate::domain::accounts::account::Account;

/// Why an account-scoped request was refused. Only ever logged; callers see a
/// single uniform denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    MissingToken,
    InvalidToken,
    InvalidId,
    UnknownAccount,
    NotOwner,
}

// Presentation layer extracts the raw header and path segment.
// This module intentionally avoids depending on HTTP types.

/// Resolves the account addressed by `raw_id` if `token` was issued for that
/// account's number.
pub async fn authorize_account<R, T>(
    repo: &R,
    tokens: &T,
    token: Option<&str>,
    raw_id: &str,
) -> Result<Account, Denial>
where
    R: AccountRepository + ?Sized,
    T: TokenIssuer + ?Sized,
{
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(Denial::MissingToken)?;
    let token_number = tokens.verify(token).map_err(|_| Denial::InvalidToken)?;
    let id: i64 = raw_id.parse().map_err(|_| Denial::InvalidId)?;
    let account = repo
        .get_account_by_id(id)
        .await
        .map_err(|_| Denial::UnknownAccount)?;
    if account.number != token_number {
        return Err(Denial::NotOwner);
    }
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::accounts::account::NewAccount;
    use crate::infrastructure::crypto::token::TokenService;
    use crate::infrastructure::memory::account_repository_memory::InMemoryAccountRepository;

    async fn setup() -> (InMemoryAccountRepository, TokenService, Account) {
        let repo = InMemoryAccountRepository::new();
        let acc = repo
            .create_account(NewAccount::new("Jack", "Reacher", 491_253, "hash".into()))
            .await
            .unwrap();
        (repo, TokenService::new("secret", 3600, false), acc)
    }

    #[tokio::test]
    async fn owner_token_is_accepted() {
        let (repo, tokens, acc) = setup().await;
        let token = tokens.issue(acc.number).unwrap();
        let got = authorize_account(&repo, &tokens, Some(&token), &acc.id.to_string())
            .await
            .unwrap();
        assert_eq!(got, acc);
    }

    #[tokio::test]
    async fn every_failed_check_is_denied() {
        let (repo, tokens, acc) = setup().await;
        let own = tokens.issue(acc.number).unwrap();
        let foreign = tokens.issue(123_456).unwrap();
        let forged = TokenService::new("other", 3600, false)
            .issue(acc.number)
            .unwrap();
        let id = acc.id.to_string();

        let cases = [
            (None, id.as_str(), Denial::MissingToken),
            (Some("  "), id.as_str(), Denial::MissingToken),
            (Some(forged.as_str()), id.as_str(), Denial::InvalidToken),
            (Some(own.as_str()), "abc", Denial::InvalidId),
            (Some(own.as_str()), "999", Denial::UnknownAccount),
            (Some(foreign.as_str()), id.as_str(), Denial::NotOwner),
        ];
        for (token, raw_id, expected) in cases {
            let got = authorize_account(&repo, &tokens, token, raw_id).await;
            assert_eq!(got.unwrap_err(), expected);
        }
    }
}
