//! Database migration management.

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

/// Runs the migrations in `migrations/`, embedded at compile time.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DatabaseError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
