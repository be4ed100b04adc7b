//! Probe insertion.

use sqlx::SqlitePool;

use crate::enrichment::AggregateEnrichment;
use crate::error_handling::DatabaseError;
use crate::probe::ProbeReport;
use crate::utils::iso_timestamp;

/// JSON text for the four enrichment columns, `None` when not enriched.
type EnrichmentColumns = [Option<String>; 4];

fn enrichment_columns(
    enrichment: Option<&AggregateEnrichment>,
) -> Result<EnrichmentColumns, DatabaseError> {
    let Some(e) = enrichment else {
        return Ok([None, None, None, None]);
    };
    Ok([
        Some(serde_json::to_string(&e.whois)?),
        Some(serde_json::to_string(&e.geoip)?),
        Some(serde_json::to_string(&e.tls)?),
        Some(serde_json::to_string(&e.dns)?),
    ])
}

/// Records one probe: target (found or created), probe row and result row.
///
/// All three writes happen in one transaction.
///
/// # Returns
///
/// The new probe's `id`.
pub async fn insert_probe(
    pool: &SqlitePool,
    name: &str,
    url: &str,
    report: &ProbeReport,
) -> Result<i64, DatabaseError> {
    let [whois, geoip, tls, dns] = enrichment_columns(report.enrichment.as_ref())?;

    log::debug!("Recording probe for target {name} ({url})");

    let mut tx = pool.begin().await.map_err(DatabaseError::SqlError)?;

    // 1. Find or create the target; the no-op update makes RETURNING yield the existing id
    let target_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO targets (name, url) VALUES (?, ?)
         ON CONFLICT(name, url) DO UPDATE SET name = excluded.name
         RETURNING id",
    )
    .bind(name)
    .bind(url)
    .fetch_one(&mut *tx)
    .await?;

    // 2. Probe
    let probe_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO probes (target_id, timestamp) VALUES (?, ?) RETURNING id",
    )
    .bind(target_id)
    .bind(iso_timestamp(&report.timestamp))
    .fetch_one(&mut *tx)
    .await?;

    // 3. Result
    sqlx::query(
        "INSERT INTO results (probe_id, ip, port, whois, geoip, tls, dns)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(probe_id)
    .bind(&report.ip)
    .bind(i64::from(report.port))
    .bind(whois)
    .bind(geoip)
    .bind(tls)
    .bind(dns)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        log::error!("Failed to insert result for probe {probe_id}: {e}");
        DatabaseError::SqlError(e)
    })?;

    tx.commit().await?;

    Ok(probe_id)
}
