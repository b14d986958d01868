use std::sync::Arc;

use crate::application::ports::account_number_generator::AccountNumberGenerator;
use crate::application::ports::account_repository::AccountRepository;
use crate::application::ports::password_hasher::PasswordHasher;
use crate::application::ports::token_issuer::TokenIssuer;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    account_repo: Arc<dyn AccountRepository>,
    account_numbers: Arc<dyn AccountNumberGenerator>,
    password_hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AppServices {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        account_numbers: Arc<dyn AccountNumberGenerator>,
        password_hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            account_repo,
            account_numbers,
            password_hasher,
            tokens,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn account_repo(&self) -> Arc<dyn AccountRepository> {
        self.services.account_repo.clone()
    }

    pub fn account_numbers(&self) -> Arc<dyn AccountNumberGenerator> {
        self.services.account_numbers.clone()
    }

    pub fn password_hasher(&self) -> Arc<dyn PasswordHasher> {
        self.services.password_hasher.clone()
    }

    pub fn tokens(&self) -> Arc<dyn TokenIssuer> {
        self.services.tokens.clone()
    }
}
