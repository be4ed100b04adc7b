//! Batch resolution of `name,url` CSV rows.
//!
//! Rows are probed with bounded concurrency and written in input order as
//! `name,ip,port,timestamp`. Failed rows are logged and left out of the
//! output; they never stop the batch.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::probe::Prober;
use crate::utils::iso_timestamp;

/// Header row written before any result.
pub const OUTPUT_HEADER: [&str; 4] = ["name", "ip", "port", "timestamp"];

/// Batch behaviour.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Run enrichment and write one JSON line per success to the diagnostics writer
    pub enrich: bool,
    /// Rows in flight at once
    pub concurrency: usize,
}

/// Row counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Rows that were probed
    pub processed: usize,
    /// Probes that produced an output row
    pub succeeded: usize,
    /// Probes that failed (invalid URL, resolution error)
    pub failed: usize,
    /// Rows never probed (header, blank, malformed)
    pub skipped: usize,
}

#[derive(Debug)]
struct InputRow {
    line: u64,
    name: String,
    url: String,
}

fn is_header(record: &StringRecord) -> bool {
    let first = record.get(0).unwrap_or_default().to_lowercase();
    let second = record.get(1).unwrap_or_default().to_lowercase();
    (first == "name" || first == "nombre") && second == "url"
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

/// Reads `(name, url)` rows, skipping the header, blank rows and short rows.
fn read_rows<R: Read>(input: R, summary: &mut BatchSummary) -> Vec<InputRow> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let mut rows = Vec::new();
    let mut seen_content = false;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::error!("Skipping unreadable input row: {e}");
                summary.skipped += 1;
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if is_blank(&record) {
            continue;
        }
        if !seen_content {
            seen_content = true;
            if is_header(&record) {
                log::debug!("Skipping header row");
                summary.skipped += 1;
                continue;
            }
        }
        if record.len() < 2 {
            log::error!(
                "Skipping line {line}: expected name,url but found {} column(s)",
                record.len()
            );
            summary.skipped += 1;
            continue;
        }

        rows.push(InputRow {
            line,
            name: record[0].to_string(),
            url: record[1].to_string(),
        });
    }

    rows
}

/// Resolves every row of `input` and writes the results to `output`.
///
/// With `options.enrich`, each success is also written to `diagnostics` as a
/// JSON line carrying the full report. Successes are recorded when the
/// prober has a store.
///
/// # Errors
///
/// Only I/O on `output`/`diagnostics` fails the batch; per-row problems are
/// logged and counted.
pub async fn run_batch<R, W, D>(
    prober: &Prober,
    input: R,
    output: W,
    mut diagnostics: D,
    options: BatchOptions,
) -> Result<BatchSummary>
where
    R: Read,
    W: Write,
    D: Write,
{
    let mut summary = BatchSummary::default();
    let rows = read_rows(input, &mut summary);
    log::info!("Processing {} row(s)", rows.len());

    let mut writer = WriterBuilder::new().from_writer(output);
    writer
        .write_record(OUTPUT_HEADER)
        .context("Failed to write output header")?;

    let mut results = stream::iter(rows)
        .map(|row| async move {
            let outcome = if options.enrich {
                prober.probe(&row.name, &row.url).await
            } else {
                prober.resolve_only(&row.name, &row.url).await
            };
            if let Ok(report) = &outcome {
                prober.record(&row.name, &row.url, report).await;
            }
            (row, outcome)
        })
        .buffered(options.concurrency.max(1));

    while let Some((row, outcome)) = results.next().await {
        summary.processed += 1;
        let report = match outcome {
            Ok(report) => report,
            Err(e) => {
                log::error!(
                    "Failed to resolve line {} name={} url={}: {e}",
                    row.line,
                    row.name,
                    row.url
                );
                summary.failed += 1;
                continue;
            }
        };

        let port = report.port.to_string();
        let timestamp = iso_timestamp(&report.timestamp);
        writer
            .write_record([
                report.name.as_str(),
                report.ip.as_str(),
                port.as_str(),
                timestamp.as_str(),
            ])
            .context("Failed to write output row")?;

        if options.enrich {
            let line = serde_json::to_string(&report)?;
            writeln!(diagnostics, "{line}").context("Failed to write enrichment")?;
        }
        summary.succeeded += 1;
    }

    writer.flush().context("Failed to flush output")?;
    diagnostics.flush().context("Failed to flush enrichment")?;

    log::info!(
        "Batch finished: {} processed, {} succeeded, {} failed, {} skipped",
        summary.processed,
        summary.succeeded,
        summary.failed,
        summary.skipped
    );
    Ok(summary)
}
