//! The enrichment source seam and its network-backed implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use futures::future::BoxFuture;
use hickory_resolver::TokioAsyncResolver;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::initialization::{init_client, init_resolver};
use crate::{dns, geoip, tls, whois};

use super::types::Payload;

/// The four lookups the coordinator fans out to.
///
/// Each method returns a `'static` future so it can run on its own task;
/// implementations clone whatever shared handles they need into it.
pub trait EnrichmentSources: Send + Sync {
    /// WHOIS registration data for `host`.
    fn whois(&self, host: String) -> BoxFuture<'static, Result<Payload>>;
    /// Network country/organization for `ip`.
    fn geoip(&self, ip: String) -> BoxFuture<'static, Result<Payload>>;
    /// Certificate details for `host:port`.
    fn tls(&self, host: String, port: u16) -> BoxFuture<'static, Result<Payload>>;
    /// A, AAAA, MX and TXT records for `host`.
    fn dns(&self, host: String) -> BoxFuture<'static, Result<Payload>>;
}

/// Real lookups over the network.
///
/// Holds the shared, read-only handles: DNS resolver, HTTP client, RDAP
/// endpoint and WHOIS cache directory.
#[derive(Clone)]
pub struct NetworkSources {
    resolver: Arc<TokioAsyncResolver>,
    client: Option<Arc<reqwest::Client>>,
    rdap_url: Arc<str>,
    whois_cache_dir: Arc<PathBuf>,
}

impl NetworkSources {
    /// Builds the sources from explicit handles.
    ///
    /// `client: None` makes every GeoIP lookup report an error payload.
    pub fn new(
        resolver: Arc<TokioAsyncResolver>,
        client: Option<Arc<reqwest::Client>>,
        rdap_url: impl Into<String>,
        whois_cache_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            resolver,
            client,
            rdap_url: Arc::from(rdap_url.into()),
            whois_cache_dir: Arc::new(whois_cache_dir.into()),
        }
    }

    /// Builds the sources from configuration, initializing the resolver and
    /// HTTP client.
    ///
    /// A client that cannot be created is logged; GeoIP then reports an
    /// error payload instead of failing startup.
    pub fn from_config(config: &Config) -> Self {
        let client = match init_client() {
            Ok(client) => Some(client),
            Err(e) => {
                log::warn!("HTTP client unavailable, GeoIP lookups will fail: {e}");
                None
            }
        };
        Self::new(
            init_resolver(),
            client,
            config.rdap_url.clone(),
            config.whois_cache_dir.clone(),
        )
    }
}

impl EnrichmentSources for NetworkSources {
    fn whois(&self, host: String) -> BoxFuture<'static, Result<Payload>> {
        let cache_dir = Arc::clone(&self.whois_cache_dir);
        Box::pin(async move {
            let record = whois::lookup_whois(&host, &cache_dir)
                .await
                .map_err(|e| anyhow!("WHOIS failed: {e:#}"))?;
            to_payload(&record)
        })
    }

    fn geoip(&self, ip: String) -> BoxFuture<'static, Result<Payload>> {
        let client = self.client.clone();
        let rdap_url = Arc::clone(&self.rdap_url);
        Box::pin(async move {
            let client = client.ok_or_else(|| anyhow!("GeoIP failed: HTTP client unavailable"))?;
            let info = geoip::lookup_geoip(&client, &rdap_url, &ip)
                .await
                .map_err(|e| anyhow!("GeoIP failed: {e:#}"))?;
            to_payload(&info)
        })
    }

    fn tls(&self, host: String, port: u16) -> BoxFuture<'static, Result<Payload>> {
        Box::pin(async move {
            // TlsError's display is already the reported message
            let info = tls::get_tls_info(&host, port).await?;
            to_payload(&info)
        })
    }

    fn dns(&self, host: String) -> BoxFuture<'static, Result<Payload>> {
        let resolver = Arc::clone(&self.resolver);
        Box::pin(async move {
            let records = dns::lookup_dns_records(&host, &resolver).await;
            to_payload(&records)
        })
    }
}

/// Serializes a lookup result into a JSON object payload.
pub(crate) fn to_payload<T: Serialize>(value: &T) -> Result<Payload> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("expected a JSON object, got {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn offline_sources(cache_dir: &std::path::Path) -> NetworkSources {
        NetworkSources::new(init_resolver(), None, "http://127.0.0.1:9/ip/", cache_dir)
    }

    #[test]
    fn test_to_payload_requires_object() {
        assert!(to_payload(&json!({"a": 1})).is_ok());
        assert!(to_payload(&json!([1, 2])).is_err());
    }

    #[tokio::test]
    async fn test_geoip_without_client_is_error_message() {
        let dir = TempDir::new().unwrap();
        let err = offline_sources(dir.path())
            .geoip("192.0.2.1".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "GeoIP failed: HTTP client unavailable");
    }

    #[tokio::test]
    async fn test_whois_error_is_prefixed() {
        let dir = TempDir::new().unwrap();
        let err = offline_sources(dir.path())
            .whois("192.0.2.1".to_string())
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("WHOIS failed: "));
    }

    #[tokio::test]
    async fn test_dns_for_ip_literal_has_four_keys() {
        let dir = TempDir::new().unwrap();
        let payload = offline_sources(dir.path())
            .dns("192.0.2.1".to_string())
            .await
            .unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({"A": [], "AAAA": [], "MX": [], "TXT": []})
        );
    }

    #[tokio::test]
    async fn test_tls_connection_error_message() {
        let dir = TempDir::new().unwrap();
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = offline_sources(dir.path())
            .tls("127.0.0.1".to_string(), port)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("TLS failed: "));
    }
}
