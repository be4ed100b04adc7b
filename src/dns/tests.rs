//! DNS module tests.

use super::records::{is_empty_answer, render_rdata};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::{Query, ResponseCode};
use super::*;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::proto::rr::rdata::{A, AAAA, MX, TXT};
use hickory_resolver::proto::rr::{Name, RData, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::time::Duration;

/// Creates a test DNS resolver with short timeouts for faster test execution.
fn create_test_resolver() -> TokioAsyncResolver {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(5);
    opts.attempts = 1;
    opts.ndots = 0;

    TokioAsyncResolver::tokio(ResolverConfig::default(), opts)
}

#[test]
fn test_all_keys_present_when_empty() {
    let value = serde_json::to_value(DnsRecords::default()).unwrap();
    let object = value.as_object().unwrap();
    for key in ["A", "AAAA", "MX", "TXT"] {
        assert_eq!(object.get(key), Some(&serde_json::json!([])), "key {key}");
    }
    assert_eq!(object.len(), 4);
}

#[test]
fn test_no_mx_records_serializes_empty_sequence() {
    let records = DnsRecords {
        a: vec!["93.184.216.34".to_string()],
        aaaa: vec!["2606:2800:220:1:248:1893:25c8:1946".to_string()],
        mx: Vec::new(),
        txt: vec!["v=spf1 -all".to_string()],
    };
    let value = serde_json::to_value(&records).unwrap();
    assert_eq!(value["MX"], serde_json::json!([]));
    assert_eq!(value["A"], serde_json::json!(["93.184.216.34"]));
}

#[test]
fn test_render_address_records() {
    let a = RData::A(A(Ipv4Addr::new(192, 0, 2, 1)));
    let aaaa = RData::AAAA(AAAA(Ipv6Addr::LOCALHOST));
    assert_eq!(render_rdata(&a), Some("192.0.2.1".to_string()));
    assert_eq!(render_rdata(&aaaa), Some("::1".to_string()));
}

#[test]
fn test_render_mx_uses_exchange() {
    let exchange = Name::from_str("mail.example.com.").unwrap();
    let mx = RData::MX(MX::new(10, exchange));
    assert_eq!(render_rdata(&mx), Some("mail.example.com.".to_string()));
}

#[test]
fn test_render_txt_joins_strings_without_quotes() {
    let txt = RData::TXT(TXT::new(vec![
        "v=spf1 include:_spf.example.com".to_string(),
        " -all".to_string(),
    ]));
    assert_eq!(
        render_rdata(&txt),
        Some("v=spf1 include:_spf.example.com -all".to_string())
    );
}

#[test]
fn test_no_records_answers_are_empty_not_failures() {
    let query = Query::query(Name::from_str("example.com.").unwrap(), RecordType::MX);
    let no_data = ResolveError::from(ResolveErrorKind::NoRecordsFound {
        query: Box::new(query.clone()),
        soa: None,
        negative_ttl: None,
        response_code: ResponseCode::NoError,
        trusted: true,
    });
    let nx_domain = ResolveError::from(ResolveErrorKind::NoRecordsFound {
        query: Box::new(query),
        soa: None,
        negative_ttl: None,
        response_code: ResponseCode::NXDomain,
        trusted: true,
    });
    assert!(is_empty_answer(&no_data));
    assert!(is_empty_answer(&nx_domain));

    assert!(!is_empty_answer(&ResolveError::from(ResolveErrorKind::Timeout)));
    assert!(!is_empty_answer(&ResolveError::from("connection refused")));
}

#[tokio::test]
async fn test_ip_literal_returns_all_keys_empty() {
    let resolver = create_test_resolver();
    let records = lookup_dns_records("192.0.2.1", &resolver).await;
    assert_eq!(records, DnsRecords::default());
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_lookup_dns_records_google() {
    let resolver = create_test_resolver();
    let records = lookup_dns_records("google.com", &resolver).await;
    assert!(!records.a.is_empty(), "google.com should have A records");
    assert!(!records.mx.is_empty(), "google.com should have MX records");
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_lookup_nonexistent_domain_is_empty() {
    let resolver = create_test_resolver();
    let records = lookup_dns_records("definitely-does-not-exist-12345.invalid", &resolver).await;
    assert_eq!(records, DnsRecords::default());
}
