//! WHOIS response parsing and date normalization.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use regex::Regex;
use std::collections::BTreeSet;

use super::types::{DateField, WhoisRecord};

const REGISTRAR_KEYS: &[&str] = &["Registrar:", "Sponsoring Registrar:"];
const CREATION_KEYS: &[&str] = &[
    "Creation Date:",
    "Created On:",
    "Created:",
    "Registered on:",
];
const EXPIRATION_KEYS: &[&str] = &[
    "Registry Expiry Date:",
    "Registrar Registration Expiration Date:",
    "Expiration Date:",
    "Expiry date:",
    "Expires On:",
    "paid-till:",
];
const UPDATED_KEYS: &[&str] = &[
    "Updated Date:",
    "Last Updated On:",
    "Last updated:",
    "Updated:",
    "changed:",
];
const NAME_SERVER_KEYS: &[&str] = &["Name Server:", "nserver:", "Nameservers:"];

/// Extracts the reported fields from a raw WHOIS response.
///
/// When a referral chain was followed, `raw` holds the registrar response
/// followed by the registry response, so the first match wins for
/// single-valued fields.
pub(crate) fn parse_whois(raw: &str) -> WhoisRecord {
    WhoisRecord {
        registrar: extract_first(raw, REGISTRAR_KEYS),
        creation_date: normalize_date(&DateField::from_values(extract_all(raw, CREATION_KEYS))),
        expiration_date: normalize_date(&DateField::from_values(extract_all(
            raw,
            EXPIRATION_KEYS,
        ))),
        updated_date: normalize_date(&DateField::from_values(extract_all(raw, UPDATED_KEYS))),
        name_servers: extract_multi(raw, NAME_SERVER_KEYS),
    }
}

/// Normalizes a WHOIS date field into an ISO-8601 string.
///
/// - `Absent` → `None`
/// - `Single` → that value
/// - `Multiple` → the first non-empty value
///
/// Recognized formats are rendered as `YYYY-MM-DDTHH:MM:SSZ`; anything else is
/// returned verbatim (trimmed).
pub fn normalize_date(field: &DateField) -> Option<String> {
    let value = match field {
        DateField::Absent => None,
        DateField::Single(value) => Some(value.as_str()),
        DateField::Multiple(values) => values
            .iter()
            .map(|v| v.as_str())
            .find(|v| !v.trim().is_empty()),
    }?;

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(
        parse_any_date(trimmed)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| trimmed.to_string()),
    )
}

/// Attempts to parse a date string in the formats WHOIS servers commonly use
pub(crate) fn parse_any_date(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    let dt_formats = [
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y.%m.%d %H:%M:%S",
        "%d-%b-%Y %H:%M:%S",
    ];
    if let Some(parsed) = dt_formats
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(trimmed, f).ok())
    {
        return Some(Utc.from_utc_datetime(&parsed));
    }

    // Offsets like "2024-01-15 10:30:45 +0200" or "... -07:00"
    let tz_formats = ["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%dT%H:%M:%S%z"];
    if let Some(parsed) = tz_formats
        .iter()
        .find_map(|f| DateTime::parse_from_str(trimmed, f).ok())
    {
        return Some(parsed.with_timezone(&Utc));
    }

    let date_formats = ["%Y-%m-%d", "%Y.%m.%d", "%d-%b-%Y", "%Y/%m/%d", "%d.%m.%Y"];
    if let Some(parsed) = date_formats
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(trimmed, f).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Some(Utc.from_utc_datetime(&parsed));
    }

    // Last resort: a date embedded in longer text ("2024-01-15 (YYYY-MM-DD)")
    let re = Regex::new(r"^\d{4}-\d{2}-\d{2}\b").ok()?;
    re.find(trimmed)
        .and_then(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Case-insensitive `strip_prefix`.
fn strip_key<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let head = line.get(..key.len())?;
    if head.eq_ignore_ascii_case(key) {
        line.get(key.len()..)
    } else {
        None
    }
}

fn line_value<'a>(line: &'a str, keys: &[&str]) -> Option<&'a str> {
    let trimmed = line.trim();
    keys.iter().find_map(|k| strip_key(trimmed, k).map(str::trim))
}

pub(crate) fn extract_first(raw: &str, keys: &[&str]) -> Option<String> {
    raw.lines()
        .filter_map(|line| line_value(line, keys))
        .find(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Every value for the keys, in response order, empty values included.
pub(crate) fn extract_all(raw: &str, keys: &[&str]) -> Vec<String> {
    raw.lines()
        .filter_map(|line| line_value(line, keys))
        .map(ToString::to_string)
        .collect()
}

pub(crate) fn extract_multi(raw: &str, keys: &[&str]) -> Vec<String> {
    let set: BTreeSet<String> = raw
        .lines()
        .filter_map(|line| line_value(line, keys))
        .filter(|v| !v.is_empty())
        // Some registries append the glue address: "ns1.example.com 192.0.2.1"
        .filter_map(|v| v.split_whitespace().next())
        .map(|v| v.trim_end_matches('.').to_ascii_lowercase())
        .collect();
    set.into_iter().collect()
}

/// Finds the next server to ask in a referral chain.
pub(crate) fn extract_referral(raw: &str, keys: &[&str]) -> Option<String> {
    extract_first(raw, keys).map(|server| {
        server
            .trim_start_matches("whois://")
            .trim_end_matches('/')
            .to_ascii_lowercase()
    })
}
