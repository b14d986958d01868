use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;
use sqlx::{Pool, Postgres};

pub type PgPool = Pool<Postgres>;

/// `store_timeout` bounds both waiting for a pooled connection and, through
/// the server-side `statement_timeout`, every statement run on it.
pub async fn connect_pool(
    database_url: &str,
    max_connections: u32,
    store_timeout: Duration,
) -> anyhow::Result<PgPool> {
    let options = PgConnectOptions::from_str(database_url)?
        .options([("statement_timeout", store_timeout.as_millis().to_string())]);
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(store_timeout)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    // Uses compile-time embedded migrations under ./migrations
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub mod repositories;
