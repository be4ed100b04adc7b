//! Enrichment result types.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumIter};

/// A JSON object produced by one enrichment lookup.
pub type Payload = Map<String, Value>;

/// The four enrichment sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Source {
    /// Domain registration data
    Whois,
    /// Network country/organization for the resolved IP
    Geoip,
    /// Certificate metadata from a TLS handshake
    Tls,
    /// A, AAAA, MX and TXT records
    Dns,
}

/// Outcome of one enrichment source.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentResult {
    /// The lookup finished within its budget.
    Success(Payload),
    /// The lookup returned an error or panicked.
    Failure(String),
    /// The budget elapsed before the lookup finished.
    Timeout,
}

impl EnrichmentResult {
    /// Returns `true` for [`EnrichmentResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, EnrichmentResult::Success(_))
    }

    /// Returns `true` for [`EnrichmentResult::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, EnrichmentResult::Timeout)
    }

    /// The error message, for failures and timeouts.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            EnrichmentResult::Success(_) => None,
            EnrichmentResult::Failure(message) => Some(message),
            EnrichmentResult::Timeout => Some("timeout"),
        }
    }

    /// The reported JSON object: the payload, or `{"error": <message>}`.
    pub fn to_payload(&self) -> Payload {
        match self {
            EnrichmentResult::Success(payload) => payload.clone(),
            EnrichmentResult::Failure(message) => error_payload(message),
            EnrichmentResult::Timeout => error_payload("timeout"),
        }
    }
}

impl Serialize for EnrichmentResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EnrichmentResult::Success(payload) => payload.serialize(serializer),
            _ => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", self.error_message().unwrap_or_default())?;
                map.end()
            }
        }
    }
}

/// Builds the `{"error": message}` object.
pub fn error_payload(message: impl Into<String>) -> Payload {
    let mut payload = Map::new();
    payload.insert("error".to_string(), Value::String(message.into()));
    payload
}

/// Results of all four sources for one request.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AggregateEnrichment {
    /// WHOIS result
    pub whois: EnrichmentResult,
    /// GeoIP result
    pub geoip: EnrichmentResult,
    /// TLS result
    pub tls: EnrichmentResult,
    /// DNS result
    pub dns: EnrichmentResult,
}

impl AggregateEnrichment {
    /// The result for one source.
    pub fn get(&self, source: Source) -> &EnrichmentResult {
        match source {
            Source::Whois => &self.whois,
            Source::Geoip => &self.geoip,
            Source::Tls => &self.tls,
            Source::Dns => &self.dns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn test_source_names() {
        let names: Vec<String> = Source::iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["whois", "geoip", "tls", "dns"]);
        assert_eq!(Source::Geoip.as_ref(), "geoip");
    }

    #[test]
    fn test_success_serializes_as_payload() {
        let mut payload = Payload::new();
        payload.insert("country".to_string(), json!("US"));
        let value = serde_json::to_value(EnrichmentResult::Success(payload)).unwrap();
        assert_eq!(value, json!({"country": "US"}));
    }

    #[test]
    fn test_failure_and_timeout_serialize_as_error() {
        let failure = EnrichmentResult::Failure("WHOIS failed: refused".to_string());
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({"error": "WHOIS failed: refused"})
        );
        assert_eq!(
            serde_json::to_value(EnrichmentResult::Timeout).unwrap(),
            json!({"error": "timeout"})
        );
    }

    #[test]
    fn test_to_payload_matches_serialization() {
        for result in [
            EnrichmentResult::Success(Payload::new()),
            EnrichmentResult::Failure("boom".to_string()),
            EnrichmentResult::Timeout,
        ] {
            assert_eq!(
                Value::Object(result.to_payload()),
                serde_json::to_value(&result).unwrap()
            );
        }
    }

    #[test]
    fn test_aggregate_serializes_four_fields() {
        let aggregate = AggregateEnrichment {
            whois: EnrichmentResult::Timeout,
            geoip: EnrichmentResult::Failure("x".to_string()),
            tls: EnrichmentResult::Success(Payload::new()),
            dns: EnrichmentResult::Success(Payload::new()),
        };
        let value = serde_json::to_value(&aggregate).unwrap();
        for source in Source::iter() {
            assert!(value.get(source.as_ref()).is_some(), "missing {source}");
        }
        assert_eq!(value["whois"], json!({"error": "timeout"}));
        assert!(aggregate.get(Source::Tls).is_success());
        assert!(aggregate.get(Source::Whois).is_timeout());
    }
}
