//! WHOIS domain registration lookup.
//!
//! Queries the port-43 WHOIS system directly, following the referral chain
//! from IANA to the registry and, for thin registries, to the registrar.
//! Results are cached on disk as JSON (one file per domain) for
//! [`WHOIS_CACHE_TTL`](crate::config::WHOIS_CACHE_TTL).

mod cache;
mod client;
mod parse;
mod types;

use anyhow::{anyhow, Result};
use std::net::IpAddr;
use std::path::Path;

use crate::config::WHOIS_CACHE_TTL;

pub use parse::normalize_date;
pub use types::{DateField, WhoisRecord};

use cache::{load_from_cache, save_to_cache};

/// Reduces a host name to the domain a registry knows about.
///
/// Uses the Public Suffix List, so `www.bbc.co.uk` gives `bbc.co.uk` rather
/// than the `co.uk` suffix. Returns `None` for IP literals, single-label
/// names and bare public suffixes.
pub fn registrable_domain(host: &str) -> Option<String> {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    if host.is_empty() || host.parse::<IpAddr>().is_ok() {
        return None;
    }
    if !host.contains('.') || host.split('.').any(str::is_empty) {
        return None;
    }
    psl::domain_str(&host).map(str::to_string)
}

/// Performs a WHOIS lookup for the domain that `host` belongs to.
///
/// The on-disk cache in `cache_dir` is consulted first; unreadable cache
/// entries are ignored and a failed cache write is only logged.
///
/// # Errors
///
/// Returns an error if the host has no registrable domain, or if the IANA or
/// registry query fails.
pub async fn lookup_whois(host: &str, cache_dir: &Path) -> Result<WhoisRecord> {
    let domain =
        registrable_domain(host).ok_or_else(|| anyhow!("not a registrable domain: {host}"))?;

    match load_from_cache(cache_dir, &domain, WHOIS_CACHE_TTL) {
        Ok(Some(record)) => {
            log::debug!("WHOIS cache hit for {domain}");
            return Ok(record);
        }
        Ok(None) => {}
        Err(e) => log::debug!("Ignoring WHOIS cache entry for {domain}: {e:#}"),
    }

    log::debug!("Starting WHOIS lookup for domain: {domain}");
    let raw = client::lookup_raw(&domain).await?;
    let record = parse::parse_whois(&raw);
    log::debug!("WHOIS lookup successful for {domain}");

    if let Err(e) = save_to_cache(cache_dir, &domain, &record) {
        log::warn!("Failed to cache WHOIS result for {domain}: {e:#}");
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_registrable_domain() {
        assert_eq!(registrable_domain("example.com").as_deref(), Some("example.com"));
        assert_eq!(
            registrable_domain("www.Example.COM.").as_deref(),
            Some("example.com")
        );
        assert_eq!(registrable_domain("a.b.c.example.org").as_deref(), Some("example.org"));
    }

    #[test]
    fn test_registrable_domain_multi_label_suffixes() {
        assert_eq!(registrable_domain("www.bbc.co.uk").as_deref(), Some("bbc.co.uk"));
        assert_eq!(
            registrable_domain("a.b.example.com.au").as_deref(),
            Some("example.com.au")
        );
        assert_eq!(registrable_domain("shop.example.co.jp").as_deref(), Some("example.co.jp"));
        // A bare suffix has no registrable domain
        assert_eq!(registrable_domain("co.uk"), None);
    }

    #[test]
    fn test_registrable_domain_rejects_ips_and_single_labels() {
        assert_eq!(registrable_domain("192.0.2.1"), None);
        assert_eq!(registrable_domain("::1"), None);
        assert_eq!(registrable_domain("localhost"), None);
        assert_eq!(registrable_domain(""), None);
        assert_eq!(registrable_domain("a..com"), None);
    }

    #[tokio::test]
    async fn test_lookup_ip_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = lookup_whois("93.184.216.34", dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("not a registrable domain"));
    }

    #[tokio::test]
    async fn test_lookup_served_from_cache() {
        let dir = TempDir::new().unwrap();
        let record = WhoisRecord {
            registrar: Some("Cached Registrar".to_string()),
            ..Default::default()
        };
        save_to_cache(dir.path(), "example.com", &record).unwrap();

        // Subdomains share the registrable domain's cache entry
        let loaded = lookup_whois("www.example.com", dir.path()).await.unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_lookup_whois_live() {
        let dir = TempDir::new().unwrap();
        let record = lookup_whois("example.com", dir.path()).await.unwrap();
        assert!(record.creation_date.is_some());
        assert!(dir.path().join("example_com.json").exists());
    }
}
