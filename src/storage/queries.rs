//! History queries.

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

use super::models::{DailyCount, HistorySummary, ProbeHistoryRow};

/// Newest probes first, joined with their target and result.
pub async fn fetch_recent_probes(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<ProbeHistoryRow>, DatabaseError> {
    let rows = sqlx::query_as::<_, (String, String, String, i64, String)>(
        "SELECT t.name, t.url, r.ip, r.port, p.timestamp
         FROM probes p
         JOIN targets t ON t.id = p.target_id
         JOIN results r ON r.probe_id = p.id
         ORDER BY p.timestamp DESC, p.id DESC
         LIMIT ?",
    )
    .bind(limit.max(0))
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(name, url, ip, port, timestamp)| ProbeHistoryRow {
            name,
            url,
            ip,
            port: u16::try_from(port).unwrap_or_default(),
            timestamp,
        })
        .collect())
}

/// Probes per UTC day for the last `days` days (today included), newest first.
///
/// Days without probes are absent.
pub async fn fetch_daily_counts(
    pool: &SqlitePool,
    days: u32,
) -> Result<Vec<DailyCount>, DatabaseError> {
    // Timestamps are fixed-width ISO-8601, so the day is the first ten characters
    let first_day = Utc::now()
        .checked_sub_signed(Duration::days(i64::from(days.saturating_sub(1))))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
        .format("%Y-%m-%d")
        .to_string();

    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT substr(timestamp, 1, 10) AS day, COUNT(*) AS probes
         FROM probes
         WHERE substr(timestamp, 1, 10) >= ?
         GROUP BY day
         ORDER BY day DESC",
    )
    .bind(first_day)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(day, probes)| DailyCount { day, probes })
        .collect())
}

/// Target and result totals plus the newest probe timestamp.
pub async fn fetch_summary(pool: &SqlitePool) -> Result<HistorySummary, DatabaseError> {
    let (targets, results, last_probe) = sqlx::query_as::<_, (i64, i64, Option<String>)>(
        "SELECT
            (SELECT COUNT(*) FROM targets),
            (SELECT COUNT(*) FROM results),
            (SELECT MAX(timestamp) FROM probes)",
    )
    .fetch_one(pool)
    .await?;

    Ok(HistorySummary {
        targets,
        results,
        last_probe,
    })
}
