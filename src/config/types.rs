//! Configuration types.
//!
//! This module defines the enums and structs used for configuration, both by
//! the library (constructed programmatically) and by the CLI.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_BATCH_CONCURRENCY, DEFAULT_DNS_BUDGET_MS, DEFAULT_GEOIP_BUDGET_MS,
    DEFAULT_RDAP_IP_URL, DEFAULT_TLS_BUDGET_MS, DEFAULT_WHOIS_BUDGET_MS, DEFAULT_WHOIS_CACHE_DIR,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// What the coordinator does with a lookup task whose budget has elapsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TimeoutPolicy {
    /// Stop waiting and let the task run to completion in the background
    #[default]
    Detach,
    /// Stop waiting and abort the task at its next await point
    Abort,
}

/// Per-source enrichment budgets.
///
/// Each budget is the longest the coordinator waits for that source before
/// reporting a timeout for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Budgets {
    /// WHOIS lookup budget
    pub whois: Duration,
    /// GeoIP/RDAP lookup budget
    pub geoip: Duration,
    /// TLS certificate lookup budget
    pub tls: Duration,
    /// DNS records lookup budget
    pub dns: Duration,
}

impl Budgets {
    /// Builds budgets from millisecond values.
    pub fn from_millis(whois: u64, geoip: u64, tls: u64, dns: u64) -> Self {
        Self {
            whois: Duration::from_millis(whois),
            geoip: Duration::from_millis(geoip),
            tls: Duration::from_millis(tls),
            dns: Duration::from_millis(dns),
        }
    }

    /// The longest budget, which bounds the wall-clock time of one enrichment.
    pub fn max(&self) -> Duration {
        self.whois.max(self.geoip).max(self.tls).max(self.dns)
    }
}

impl Default for Budgets {
    fn default() -> Self {
        Self::from_millis(
            DEFAULT_WHOIS_BUDGET_MS,
            DEFAULT_GEOIP_BUDGET_MS,
            DEFAULT_TLS_BUDGET_MS,
            DEFAULT_DNS_BUDGET_MS,
        )
    }
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without going through the CLI.
///
/// # Examples
///
/// ```no_run
/// use netlens::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: Some(PathBuf::from("./netlens.db")),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Database path (SQLite file); persistence is disabled when `None`
    pub db_path: Option<PathBuf>,

    /// Per-source enrichment budgets
    pub budgets: Budgets,

    /// What happens to a lookup task whose budget elapsed
    pub timeout_policy: TimeoutPolicy,

    /// RDAP endpoint used for IP lookups (the IP is appended)
    pub rdap_url: String,

    /// WHOIS on-disk cache directory
    pub whois_cache_dir: PathBuf,

    /// Batch rows processed concurrently
    pub batch_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            db_path: None,
            budgets: Budgets::default(),
            timeout_policy: TimeoutPolicy::Detach,
            rdap_url: DEFAULT_RDAP_IP_URL.to_string(),
            whois_cache_dir: PathBuf::from(DEFAULT_WHOIS_CACHE_DIR),
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_default_budgets() {
        let budgets = Budgets::default();
        assert_eq!(budgets.whois, Duration::from_millis(1000));
        assert_eq!(budgets.geoip, Duration::from_millis(1000));
        assert_eq!(budgets.tls, Duration::from_millis(2000));
        assert_eq!(budgets.dns, Duration::from_millis(1000));
    }

    #[test]
    fn test_budgets_max_is_longest_source() {
        let budgets = Budgets::from_millis(300, 1200, 50, 900);
        assert_eq!(budgets.max(), Duration::from_millis(1200));
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.db_path.is_none());
        assert_eq!(config.timeout_policy, TimeoutPolicy::Detach);
        assert_eq!(config.rdap_url, "https://rdap.org/ip/");
        assert_eq!(config.batch_concurrency, 8);
        assert_eq!(config.whois_cache_dir, PathBuf::from(".whois_cache"));
    }
}
