use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use super::settings::Settings;

/// Builds the process-wide pool. Connections are opened on first use, so an
/// unreachable store surfaces as request errors instead of a crash.
pub(crate) fn create_pool(settings: &Settings) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&settings.database_url)
        .with_context(|| format!("invalid DATABASE_URL '{}'", settings.database_url))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.database_max_connections)
        .acquire_timeout(Duration::from_secs(settings.database_acquire_timeout_secs))
        .connect_lazy_with(options);

    Ok(pool)
}

pub(crate) async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("failed to apply database migrations")?;

    info!("database schema is up to date");
    Ok(())
}

/// Single-connection in-memory store with the schema applied.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let options =
        SqliteConnectOptions::from_str("sqlite::memory:").expect("in-memory url must parse");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory sqlite must open");

    run_migrations(&pool)
        .await
        .expect("migrations must apply to a fresh store");
    pool
}

/// File-backed store shared by `max_connections` connections, for tests that
/// need writers to actually overlap.
#[cfg(test)]
pub(crate) async fn file_test_pool(path: &std::path::Path, max_connections: u32) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(30));
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .expect("file sqlite must open");

    run_migrations(&pool)
        .await
        .expect("migrations must apply to a fresh store");
    pool
}
