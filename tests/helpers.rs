// Shared test doubles for the resolver and the enrichment sources.
//
// Each integration test file pulls this in with `mod helpers;`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use futures::future::BoxFuture;
use serde_json::json;

use netlens::resolve::AddressResolver;
use netlens::{Budgets, EnrichmentSources, Payload, Prober, ResolveError, TimeoutPolicy};

/// Resolves hosts from a fixed table; unknown hosts fail like NXDOMAIN.
#[derive(Default)]
pub struct TableResolver {
    hosts: HashMap<String, String>,
}

impl TableResolver {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            hosts: entries
                .iter()
                .map(|(host, ip)| (host.to_string(), ip.to_string()))
                .collect(),
        }
    }
}

impl AddressResolver for TableResolver {
    fn resolve<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Result<String, ResolveError>> {
        Box::pin(async move {
            self.hosts.get(host).cloned().ok_or_else(|| {
                ResolveError::Resolution("failed to lookup address information".to_string())
            })
        })
    }
}

/// How a fake source behaves.
#[derive(Clone)]
pub enum Behavior {
    /// Return `payload` after `delay`
    Succeed { delay: Duration, payload: Payload },
    /// Return an error with `message`
    Fail(&'static str),
    /// Panic inside the task
    Panic,
}

impl Behavior {
    pub fn quick(payload: serde_json::Value) -> Self {
        Behavior::Succeed {
            delay: Duration::from_millis(10),
            payload: payload.as_object().cloned().unwrap_or_default(),
        }
    }

    pub fn slow(delay_ms: u64) -> Self {
        Behavior::Succeed {
            delay: Duration::from_millis(delay_ms),
            payload: json!({"slow": true}).as_object().cloned().unwrap_or_default(),
        }
    }

    fn run(self) -> BoxFuture<'static, anyhow::Result<Payload>> {
        Box::pin(async move {
            match self {
                Behavior::Succeed { delay, payload } => {
                    tokio::time::sleep(delay).await;
                    Ok(payload)
                }
                Behavior::Fail(message) => Err(anyhow!(message)),
                Behavior::Panic => panic!("source exploded"),
            }
        })
    }
}

/// Enrichment sources with scripted behavior.
#[derive(Clone)]
pub struct FakeSources {
    pub whois: Behavior,
    pub geoip: Behavior,
    pub tls: Behavior,
    pub dns: Behavior,
}

impl Default for FakeSources {
    fn default() -> Self {
        Self {
            whois: Behavior::quick(json!({"registrar": "Example Registrar"})),
            geoip: Behavior::quick(json!({"country": "US", "organization": "EXAMPLE-NET"})),
            tls: Behavior::quick(json!({"issuer": "Example CA", "subject": "example.com"})),
            dns: Behavior::quick(json!({"A": ["192.0.2.1"], "AAAA": [], "MX": [], "TXT": []})),
        }
    }
}

impl EnrichmentSources for FakeSources {
    fn whois(&self, _host: String) -> BoxFuture<'static, anyhow::Result<Payload>> {
        self.whois.clone().run()
    }

    fn geoip(&self, _ip: String) -> BoxFuture<'static, anyhow::Result<Payload>> {
        self.geoip.clone().run()
    }

    fn tls(&self, _host: String, _port: u16) -> BoxFuture<'static, anyhow::Result<Payload>> {
        self.tls.clone().run()
    }

    fn dns(&self, _host: String) -> BoxFuture<'static, anyhow::Result<Payload>> {
        self.dns.clone().run()
    }
}

/// A prober over the given hosts with default fake sources.
pub fn fake_prober(hosts: &[(&str, &str)]) -> Prober {
    Prober::new(
        Arc::new(TableResolver::with(hosts)),
        Arc::new(FakeSources::default()),
        Budgets::default(),
        TimeoutPolicy::Detach,
    )
}
