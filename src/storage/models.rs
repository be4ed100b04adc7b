//! Rows read back from the store.

use serde::{Deserialize, Serialize};

/// One recorded probe, joined with its target and result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeHistoryRow {
    /// Target name
    pub name: String,
    /// Target URL as submitted
    pub url: String,
    /// Resolved IP address
    pub ip: String,
    /// Resolved port
    pub port: u16,
    /// Probe timestamp (ISO-8601 UTC)
    pub timestamp: String,
}

/// Number of probes recorded on one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// `YYYY-MM-DD`
    pub day: String,
    /// Probes recorded that day
    pub probes: i64,
}

/// Store-wide totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Distinct (name, url) targets
    pub targets: i64,
    /// Recorded results
    pub results: i64,
    /// Timestamp of the newest probe, if any
    pub last_probe: Option<String>,
}
