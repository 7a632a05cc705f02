//! Persistence layer for the dubline localization pipeline.
//!
//! `models` holds row structs and request DTOs; `repositories` holds the
//! data-access operations. Every multi-row mutation that must preserve a
//! cross-entity invariant runs inside a single transaction opened by the
//! repository method that owns it.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Shared connection pool type used across the workspace.
pub type DbPool = PgPool;

/// Create a connection pool for the given database URL.
///
/// Constructed once at process bootstrap and passed by reference into the
/// repositories; nothing in this crate lazily initializes global state.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Cheap connectivity probe used by the health endpoint and bootstrap.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
