//! Bounded-time fan-out over the enrichment sources.

use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::task::JoinHandle;

use crate::config::{Budgets, TimeoutPolicy};
use crate::utils::{duration_to_ms, sanitize_and_truncate_error_message};

use super::sources::EnrichmentSources;
use super::types::{AggregateEnrichment, EnrichmentResult, Payload, Source};

/// Runs the four lookups concurrently, each under its own budget.
///
/// Every lookup runs on its own tokio task. The four waits are joined, so the
/// call returns after at most `budgets.max()` plus scheduling overhead, with
/// every slot populated. It never fails: errors, panics and expired budgets
/// become [`EnrichmentResult::Failure`] / [`EnrichmentResult::Timeout`].
///
/// On an expired budget the task is detached ([`TimeoutPolicy::Detach`]) or
/// aborted ([`TimeoutPolicy::Abort`]).
pub async fn enrich<S>(
    sources: &S,
    host: &str,
    ip: &str,
    port: u16,
    budgets: &Budgets,
    policy: TimeoutPolicy,
) -> AggregateEnrichment
where
    S: EnrichmentSources + ?Sized,
{
    let started = Instant::now();

    let whois = tokio::spawn(sources.whois(host.to_string()));
    let geoip = tokio::spawn(sources.geoip(ip.to_string()));
    let tls = tokio::spawn(sources.tls(host.to_string(), port));
    let dns = tokio::spawn(sources.dns(host.to_string()));

    let (whois, geoip, tls, dns) = tokio::join!(
        await_with_budget(Source::Whois, whois, budgets.whois, policy),
        await_with_budget(Source::Geoip, geoip, budgets.geoip, policy),
        await_with_budget(Source::Tls, tls, budgets.tls, policy),
        await_with_budget(Source::Dns, dns, budgets.dns, policy),
    );

    log::debug!(
        "Enrichment for {host} ({ip}:{port}) settled in {}ms",
        duration_to_ms(started.elapsed())
    );

    AggregateEnrichment {
        whois,
        geoip,
        tls,
        dns,
    }
}

async fn await_with_budget(
    source: Source,
    mut handle: JoinHandle<Result<Payload>>,
    budget: Duration,
    policy: TimeoutPolicy,
) -> EnrichmentResult {
    match tokio::time::timeout(budget, &mut handle).await {
        Ok(Ok(Ok(payload))) => {
            log::debug!("{source} lookup succeeded");
            EnrichmentResult::Success(payload)
        }
        Ok(Ok(Err(e))) => {
            log::warn!("{source} lookup failed: {e}");
            EnrichmentResult::Failure(sanitize_and_truncate_error_message(&e.to_string()))
        }
        Ok(Err(join_error)) => {
            let message = if join_error.is_panic() {
                format!("{source} lookup panicked")
            } else {
                format!("{source} lookup cancelled")
            };
            log::warn!("{message}");
            EnrichmentResult::Failure(message)
        }
        Err(_) => {
            match policy {
                TimeoutPolicy::Abort => handle.abort(),
                // Dropping the handle detaches the task; it finishes on its own
                TimeoutPolicy::Detach => drop(handle),
            }
            log::warn!(
                "{source} lookup timed out after {}ms ({policy:?})",
                duration_to_ms(budget)
            );
            EnrichmentResult::Timeout
        }
    }
}
