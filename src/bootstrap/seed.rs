use crate::application::use_cases::accounts::create_account::{
    CreateAccount, CreateAccountRequest,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::accounts::account::Account;

const SEED_ACCOUNTS: &[(&str, &str, &str)] = &[("Jack", "Reacher", "password123")];

/// Creates the demo accounts. Any failure aborts startup.
pub async fn seed_accounts(ctx: &AppContext) -> anyhow::Result<Vec<Account>> {
    let repo = ctx.account_repo();
    let numbers = ctx.account_numbers();
    let hasher = ctx.password_hasher();
    let uc = CreateAccount {
        repo: repo.as_ref(),
        numbers: numbers.as_ref(),
        hasher: hasher.as_ref(),
    };
    let mut created = Vec::with_capacity(SEED_ACCOUNTS.len());
    for (first_name, last_name, password) in SEED_ACCOUNTS {
        let account = uc
            .execute(&CreateAccountRequest {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                password: password.to_string(),
            })
            .await?;
        tracing::info!(id = account.id, number = account.number, "seeded_account");
        created.push(account);
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::account_repository::AccountRepository;
    use crate::application::ports::token_issuer::TokenIssuer;
    use crate::application::use_cases::auth::login::{Login, LoginRequest};
    use crate::bootstrap::app_context::AppServices;
    use crate::bootstrap::config::Config;
    use crate::infrastructure::crypto::password::Argon2PasswordHasher;
    use crate::infrastructure::crypto::token::TokenService;
    use crate::infrastructure::memory::account_repository_memory::InMemoryAccountRepository;
    use crate::infrastructure::numbers::RandomAccountNumbers;

    fn memory_context() -> AppContext {
        let cfg = Config::from_vars(|_| None).unwrap();
        let services = AppServices::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(RandomAccountNumbers),
            Arc::new(Argon2PasswordHasher),
            Arc::new(TokenService::new("seed-secret", 3600, false)),
        );
        AppContext::new(cfg, services)
    }

    #[tokio::test]
    async fn seeded_demo_account_can_log_in() {
        let ctx = memory_context();
        let seeded = seed_accounts(&ctx).await.unwrap();
        assert_eq!(seeded.len(), 1);
        let jack = &seeded[0];
        assert_eq!((jack.first_name.as_str(), jack.last_name.as_str()), ("Jack", "Reacher"));
        assert_eq!(jack.balance, 0);

        let repo = ctx.account_repo();
        let hasher = ctx.password_hasher();
        let tokens = ctx.tokens();
        let out = Login {
            repo: repo.as_ref(),
            hasher: hasher.as_ref(),
            tokens: tokens.as_ref(),
        }
        .execute(&LoginRequest {
            number: jack.number,
            password: "password123".into(),
        })
        .await
        .unwrap();
        assert_eq!(tokens.verify(&out.token), Ok(jack.number));
        assert_eq!(repo.get_accounts().await.unwrap(), seeded);
    }
}
