//! WHOIS data structures.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// WHOIS registration data for a domain.
///
/// Dates are already normalized: ISO-8601 when the server's format was
/// recognized, the server's text verbatim otherwise, `None` when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisRecord {
    /// Registrar name
    pub registrar: Option<String>,
    /// Domain creation date
    pub creation_date: Option<String>,
    /// Domain expiration date
    pub expiration_date: Option<String>,
    /// Domain updated date
    pub updated_date: Option<String>,
    /// Nameservers, lower-cased and de-duplicated
    #[serde(default)]
    pub name_servers: Vec<String>,
}

/// A date field as it appears in a WHOIS response.
///
/// Registries and registrars repeat date lines (one per section, or both
/// responses of a referral chain), so a field can carry several values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateField {
    /// The field does not appear
    Absent,
    /// Exactly one value
    Single(String),
    /// Several values, in response order; some may be empty
    Multiple(Vec<String>),
}

impl DateField {
    /// Builds a field from every value found for it.
    pub fn from_values(mut values: Vec<String>) -> Self {
        match values.len() {
            0 => DateField::Absent,
            1 => DateField::Single(values.remove(0)),
            _ => DateField::Multiple(values),
        }
    }
}

/// Metadata about a cached WHOIS lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WhoisCacheEntry {
    pub(crate) record: WhoisRecord,
    pub(crate) cached_at: SystemTime,
    pub(crate) domain: String,
}
