//! The probe pipeline shared by the API and the CLI.
//!
//! name + url → normalize → resolve → (enrich) → [`ProbeReport`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{Budgets, Config, TimeoutPolicy};
use crate::enrichment::{enrich, AggregateEnrichment, EnrichmentSources, NetworkSources};
use crate::error_handling::ResolveError;
use crate::resolve::{normalize, AddressResolver, SystemResolver};
use crate::storage::Store;
use crate::utils::serialize_iso_timestamp;

/// Result of one probe.
///
/// Serializes as `{name, ip, port, timestamp, whois, geoip, tls, dns}`; the
/// four enrichment keys are absent for a resolve-only probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReport {
    /// Target name as submitted
    pub name: String,
    /// Resolved IP address
    pub ip: String,
    /// Port from the URL (explicit, or the scheme default)
    pub port: u16,
    /// When the probe completed (UTC)
    #[serde(serialize_with = "serialize_iso_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Enrichment results, when requested
    #[serde(flatten)]
    pub enrichment: Option<AggregateEnrichment>,
}

/// Runs probes against targets.
///
/// Holds the resolver and enrichment sources behind trait objects so tests can
/// substitute them, plus an optional [`Store`] for persistence.
#[derive(Clone)]
pub struct Prober {
    resolver: Arc<dyn AddressResolver>,
    sources: Arc<dyn EnrichmentSources>,
    budgets: Budgets,
    policy: TimeoutPolicy,
    store: Option<Store>,
}

impl Prober {
    /// Creates a prober without persistence.
    pub fn new(
        resolver: Arc<dyn AddressResolver>,
        sources: Arc<dyn EnrichmentSources>,
        budgets: Budgets,
        policy: TimeoutPolicy,
    ) -> Self {
        Self {
            resolver,
            sources,
            budgets,
            policy,
            store: None,
        }
    }

    /// Creates a prober with the system resolver and network-backed sources.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(SystemResolver),
            Arc::new(NetworkSources::from_config(config)),
            config.budgets,
            config.timeout_policy,
        )
    }

    /// Attaches a store; [`Prober::record`] becomes effective.
    pub fn with_store(mut self, store: Store) -> Self {
        self.store = Some(store);
        self
    }

    /// The attached store, if any.
    pub fn store(&self) -> Option<&Store> {
        self.store.as_ref()
    }

    /// Normalizes, resolves and enriches `url`.
    ///
    /// # Errors
    ///
    /// - `ResolveError::InvalidUrl` for a malformed URL or a missing host
    /// - `ResolveError::Resolution` when the host does not resolve
    ///
    /// Enrichment problems are never errors; they are reported per source.
    pub async fn probe(&self, name: &str, url: &str) -> Result<ProbeReport, ResolveError> {
        let (host, ip, port) = self.resolve_target(url).await?;
        let enrichment = enrich(
            self.sources.as_ref(),
            &host,
            &ip,
            port,
            &self.budgets,
            self.policy,
        )
        .await;

        Ok(ProbeReport {
            name: name.to_string(),
            ip,
            port,
            timestamp: Utc::now(),
            enrichment: Some(enrichment),
        })
    }

    /// Normalizes and resolves `url` without enrichment.
    ///
    /// # Errors
    ///
    /// Same as [`Prober::probe`].
    pub async fn resolve_only(&self, name: &str, url: &str) -> Result<ProbeReport, ResolveError> {
        let (_, ip, port) = self.resolve_target(url).await?;
        Ok(ProbeReport {
            name: name.to_string(),
            ip,
            port,
            timestamp: Utc::now(),
            enrichment: None,
        })
    }

    /// Persists a report when a store is attached.
    ///
    /// Failures are logged and swallowed: persistence never changes the
    /// outcome of a probe. Returns the probe id when a row was written.
    pub async fn record(&self, name: &str, url: &str, report: &ProbeReport) -> Option<i64> {
        let store = self.store.as_ref()?;
        match store.record_probe(name, url, report).await {
            Ok(id) => {
                log::debug!("Recorded probe {id} for {name} ({url})");
                Some(id)
            }
            Err(e) => {
                log::error!("Failed to record probe for {name} ({url}): {e}");
                None
            }
        }
    }

    async fn resolve_target(&self, url: &str) -> Result<(String, String, u16), ResolveError> {
        let target = normalize(url)?;
        if target.host.is_empty() {
            return Err(ResolveError::missing_host());
        }
        let ip = self.resolver.resolve(&target.host).await?;
        log::debug!("Resolved {url} to {ip}:{}", target.port);
        Ok((target.host, ip, target.port))
    }
}
