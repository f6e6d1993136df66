//! PostgreSQL access for DevBoard: pool setup, schema bootstrap and the
//! project repository.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Idempotent DDL for the `projects` table.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS projects (
    id          BIGSERIAL PRIMARY KEY,
    name        VARCHAR(255) NOT NULL,
    client      VARCHAR(255) NOT NULL,
    status      VARCHAR(50)  NOT NULL DEFAULT 'draft',
    description TEXT         NOT NULL DEFAULT '',
    delivery_at TIMESTAMPTZ,
    created_at  TIMESTAMPTZ  NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ  NOT NULL DEFAULT NOW()
);
CREATE INDEX IF NOT EXISTS idx_projects_created_at ON projects (created_at DESC);
";

/// Connection pool limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Upper bound on open connections.
    pub max_connections: u32,
    /// Connections kept open while idle.
    pub min_connections: u32,
    /// How long `acquire` waits for a free connection.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 25,
            min_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Create a connection pool from a database URL.
///
/// Fails fast: the pool is only returned after a liveness probe succeeds.
pub async fn create_pool(
    database_url: &str,
    settings: PoolSettings,
) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections.min(settings.max_connections))
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await?;

    health_check(&pool).await?;
    tracing::debug!(
        max_connections = settings.max_connections,
        min_connections = settings.min_connections,
        "Database pool connected"
    );
    Ok(pool)
}

/// Liveness probe: run `SELECT 1` on a pooled connection.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create the `projects` table and its index if they do not exist yet.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

/// Close every connection in the pool. Waits for checked-out connections
/// to be returned first.
pub async fn close_pool(pool: &DbPool) {
    pool.close().await;
    tracing::debug!("Database pool closed");
}
