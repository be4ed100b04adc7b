//! DNS record lookup enrichment.
//!
//! Queries A, AAAA, MX and TXT records for a host using `hickory-resolver`.
//! The result always carries all four keys; a record type that fails or has
//! no answers is an empty sequence, never a missing key or null.

mod records;

use std::net::IpAddr;

use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioAsyncResolver;
use serde::{Deserialize, Serialize};

pub use records::lookup_records;

/// DNS records for a host, keyed by record type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecords {
    /// IPv4 addresses
    #[serde(rename = "A")]
    pub a: Vec<String>,
    /// IPv6 addresses
    #[serde(rename = "AAAA")]
    pub aaaa: Vec<String>,
    /// Mail exchanger host names
    #[serde(rename = "MX")]
    pub mx: Vec<String>,
    /// Text records
    #[serde(rename = "TXT")]
    pub txt: Vec<String>,
}

/// Looks up A, AAAA, MX and TXT records for `host` concurrently.
///
/// Each record type is independent: a failure in one leaves the others
/// untouched and yields an empty sequence for itself.
pub async fn lookup_dns_records(host: &str, resolver: &TokioAsyncResolver) -> DnsRecords {
    if host.parse::<IpAddr>().is_ok() {
        log::debug!("Skipping DNS record lookup for IP literal {host}");
        return DnsRecords::default();
    }

    let (a, aaaa, mx, txt) = tokio::join!(
        lookup_records(host, RecordType::A, resolver),
        lookup_records(host, RecordType::AAAA, resolver),
        lookup_records(host, RecordType::MX, resolver),
        lookup_records(host, RecordType::TXT, resolver),
    );

    let records = DnsRecords {
        a: a.unwrap_or_default(),
        aaaa: aaaa.unwrap_or_default(),
        mx: mx.unwrap_or_default(),
        txt: txt.unwrap_or_default(),
    };
    log::debug!(
        "DNS records for {host}: {} A, {} AAAA, {} MX, {} TXT",
        records.a.len(),
        records.aaaa.len(),
        records.mx.len(),
        records.txt.len()
    );
    records
}

#[cfg(test)]
mod tests;
