use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tracing::info;

use bank_api::application::ports::account_repository::AccountRepository;
use bank_api::bootstrap::app_context::{AppContext, AppServices};
use bank_api::bootstrap::config::{Config, StoreBackend};
use bank_api::infrastructure::crypto::password::Argon2PasswordHasher;
use bank_api::infrastructure::crypto::token::TokenService;
use bank_api::infrastructure::numbers::RandomAccountNumbers;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// JSON banking API
#[derive(Parser, Debug)]
#[command(name = "bank-api", version)]
struct Cli {
    /// Seed the store with demo accounts before serving
    #[arg(long, env = "SEED")]
    seed: bool,
}

#[derive(OpenApi)]
#[openapi(
        paths(
            bank_api::presentation::http::auth::login,
            bank_api::presentation::http::accounts::list_accounts,
            bank_api::presentation::http::accounts::create_account,
            bank_api::presentation::http::accounts::get_account,
            bank_api::presentation::http::accounts::delete_account,
            bank_api::presentation::http::transfers::deposit,
            bank_api::presentation::http::transfers::transfer,
            bank_api::presentation::http::health::health,
        ),
        components(schemas(
            bank_api::presentation::http::auth::LoginRequest,
            bank_api::presentation::http::auth::LoginResponse,
            bank_api::presentation::http::accounts::Account,
            bank_api::presentation::http::accounts::CreateAccountRequest,
            bank_api::presentation::http::accounts::DeleteAccountResponse,
            bank_api::presentation::http::transfers::DepositRequest,
            bank_api::presentation::http::transfers::TransferRequest,
            bank_api::presentation::http::error::ErrorBody,
            bank_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Authentication"),
            (name = "Accounts", description = "Account management"),
            (name = "Transfers", description = "Deposits and transfers"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "bank_api=debug,tower_http=info,axum=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        api_port = cfg.api_port,
        store_backend = ?cfg.store_backend,
        jwt_enforce_expiry = cfg.jwt_enforce_expiry,
        "Starting bank API"
    );

    let account_repo: Arc<dyn AccountRepository> = match cfg.store_backend {
        StoreBackend::Postgres => {
            // Unreachable database or failed migration aborts startup
            let pool = bank_api::infrastructure::db::connect_pool(
                &cfg.database_url,
                cfg.db_max_connections,
                cfg.store_timeout(),
            )
            .await?;
            bank_api::infrastructure::db::migrate(&pool).await?;
            Arc::new(
                bank_api::infrastructure::db::repositories::account_repository_sqlx::SqlxAccountRepository::new(
                    pool,
                    cfg.store_timeout(),
                ),
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("memory_store_enabled_data_is_not_persisted");
            Arc::new(
                bank_api::infrastructure::memory::account_repository_memory::InMemoryAccountRepository::new(),
            )
        }
    };

    let tokens = TokenService::new(
        cfg.jwt_secret.clone(),
        cfg.jwt_expires_secs,
        cfg.jwt_enforce_expiry,
    );
    let services = AppServices::new(
        account_repo,
        Arc::new(RandomAccountNumbers),
        Arc::new(Argon2PasswordHasher),
        Arc::new(tokens),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    if cli.seed {
        info!("seeding the store");
        bank_api::bootstrap::seed::seed_accounts(&ctx).await?;
    }

    let app = bank_api::presentation::http::build_router(ctx)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()));

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
