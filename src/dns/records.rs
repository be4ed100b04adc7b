//! DNS record queries (A, AAAA, MX, TXT).

use anyhow::{Error, Result};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

/// Queries one record type for a domain and renders each answer as a string.
///
/// # Returns
///
/// The rendered records. "No records" and NXDOMAIN answers are an empty
/// vector, not an error.
///
/// # Errors
///
/// Real failures (timeouts, network errors, refused queries) are returned so
/// the caller can log them; the caller still reports an empty sequence.
pub async fn lookup_records(
    domain: &str,
    record_type: RecordType,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<String>, Error> {
    match resolver.lookup(domain, record_type).await {
        Ok(lookup) => Ok(lookup.iter().filter_map(render_rdata).collect()),
        Err(e) if is_empty_answer(&e) => Ok(Vec::new()),
        Err(e) => {
            if matches!(e.kind(), ResolveErrorKind::Timeout) {
                log::warn!("{record_type} record lookup timed out for {domain}: {e}");
            } else {
                log::warn!("Failed to lookup {record_type} records for {domain}: {e}");
            }
            Err(e.into())
        }
    }
}

/// `true` for "no records" answers, NXDOMAIN included.
pub(crate) fn is_empty_answer(error: &ResolveError) -> bool {
    matches!(error.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

/// Renders a single answer; records of other types (CNAME chain entries) are skipped.
pub(crate) fn render_rdata(rdata: &RData) -> Option<String> {
    match rdata {
        RData::A(a) => Some(a.0.to_string()),
        RData::AAAA(aaaa) => Some(aaaa.0.to_string()),
        RData::MX(mx) => Some(mx.exchange().to_utf8()),
        // TXT records can hold several character-strings; they are joined unquoted
        RData::TXT(txt) => Some(
            txt.iter()
                .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                .collect::<Vec<String>>()
                .join(""),
        ),
        _ => None,
    }
}
