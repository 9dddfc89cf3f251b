//! Postgres connection pool and embedded migrations.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// The pool implements [`Executor`](crate::Executor) directly.
pub type DbPool = PgPool;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect to `database_url` with at most `max_connections` open
/// connections. Only host and database name are logged; credentials in the
/// URL never reach the logs.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, DbError> {
    let options: PgConnectOptions = database_url.parse()?;
    info!(
        host = options.get_host(),
        database = options.get_database().unwrap_or("<default>"),
        max_connections,
        "connecting to postgres"
    );

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Apply the `companies`/`jobs` schema from `migrations/`, embedded at
/// build time.
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(available = migrator.iter().count(), "applying migrations");
    migrator.run(pool).await?;
    Ok(())
}
