//! Small shared helpers.
//!
//! - String sanitization for error messages
//! - Duration conversion for log lines and timing fields
//! - ISO-8601 timestamp formatting

mod sanitize;

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

pub use sanitize::sanitize_and_truncate_error_message;

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
pub fn duration_to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Formats a UTC timestamp as ISO-8601 with millisecond precision
/// (`2025-01-31T12:00:00.123Z`).
///
/// Fixed width, so stored timestamps sort lexicographically.
pub fn iso_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `serialize_with` adapter for [`iso_timestamp`].
pub fn serialize_iso_timestamp<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&iso_timestamp(timestamp))
}
