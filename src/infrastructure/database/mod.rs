//! Database Module
//!
//! PostgreSQL connection pool and schema migrations.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseSettings;
use crate::infrastructure::metrics;

/// Create a PostgreSQL connection pool
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(&settings.url)
        .await?;

    tracing::info!(
        max_connections = settings.max_connections,
        "Database pool established"
    );
    Ok(pool)
}

/// Apply the `persons`, `pets` and `users` migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Check the database answers and publish pool gauges.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;

    let size = pool.size();
    let idle = pool.num_idle() as u32;
    metrics::update_db_pool_stats(idle, size.saturating_sub(idle), pool.options().get_max_connections());
    Ok(())
}
