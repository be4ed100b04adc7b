//! SQLite persistence.
//!
//! [`Store`] is an explicit handle over a connection pool: open it once at
//! startup and pass it where it is needed. Probes are append-only; the
//! history queries feed the `history` subcommand and the `/probes` API.

mod insert;
mod migrations;
mod models;
mod pool;
mod queries;

use std::path::Path;

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;
use crate::probe::ProbeReport;

// Re-export public API
pub use migrations::run_migrations;
pub use models::{DailyCount, HistorySummary, ProbeHistoryRow};
pub use pool::init_db_pool_with_path;

/// Handle to the probe database.
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens (creating if needed) the database at `path` and applies migrations.
    pub async fn open(path: &Path) -> Result<Self, DatabaseError> {
        let pool = init_db_pool_with_path(path).await?;
        run_migrations(&pool).await?;
        log::debug!("Store opened at {}", path.display());
        Ok(Self { pool })
    }

    /// The underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Records a probe of the target `(name, url)` and returns the probe id.
    ///
    /// A repeated `(name, url)` reuses the existing target row.
    pub async fn record_probe(
        &self,
        name: &str,
        url: &str,
        report: &ProbeReport,
    ) -> Result<i64, DatabaseError> {
        insert::insert_probe(&self.pool, name, url, report).await
    }

    /// The most recent `limit` probes, newest first.
    pub async fn recent_probes(&self, limit: i64) -> Result<Vec<ProbeHistoryRow>, DatabaseError> {
        queries::fetch_recent_probes(&self.pool, limit).await
    }

    /// Probes per UTC day over the last `days` days, newest first.
    pub async fn daily_counts(&self, days: u32) -> Result<Vec<DailyCount>, DatabaseError> {
        queries::fetch_daily_counts(&self.pool, days).await
    }

    /// Store-wide totals.
    pub async fn summary(&self) -> Result<HistorySummary, DatabaseError> {
        queries::fetch_summary(&self.pool).await
    }
}
