//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including per-source enrichment budgets, network I/O timeouts, and limits.

use std::time::Duration;

// Enrichment budgets (how long the coordinator waits for each source)
/// Default WHOIS budget in milliseconds
pub const DEFAULT_WHOIS_BUDGET_MS: u64 = 1000;
/// Default GeoIP/RDAP budget in milliseconds
pub const DEFAULT_GEOIP_BUDGET_MS: u64 = 1000;
/// Default TLS budget in milliseconds
/// TLS gets twice the others: TCP connect plus a full handshake, sometimes two
pub const DEFAULT_TLS_BUDGET_MS: u64 = 2000;
/// Default DNS records budget in milliseconds
pub const DEFAULT_DNS_BUDGET_MS: u64 = 1000;

// Network operation timeouts (bound the work of a detached lookup task)
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 2;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 3;
/// TLS handshake timeout in seconds
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 3;
/// WHOIS (port 43) per-query timeout in seconds
pub const WHOIS_TIMEOUT_SECS: u64 = 3;
/// RDAP HTTP request timeout in seconds
pub const RDAP_TIMEOUT_SECS: u64 = 3;

/// Default RDAP endpoint for IP lookups; the IP address is appended
pub const DEFAULT_RDAP_IP_URL: &str = "https://rdap.org/ip/";
/// IANA WHOIS server, used to discover the registry server for a TLD
pub const IANA_WHOIS_SERVER: &str = "whois.iana.org";
/// Default cache directory for WHOIS data
pub const DEFAULT_WHOIS_CACHE_DIR: &str = ".whois_cache";
/// WHOIS cache TTL: 7 days (registration data changes infrequently)
pub const WHOIS_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);
/// Maximum WHOIS response size in bytes (256KB)
pub const MAX_WHOIS_RESPONSE_SIZE: usize = 256 * 1024;

/// Default database path (SQLite file)
pub const DB_PATH: &str = "./netlens.db";
/// Default API listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";

// Batch processing
/// Default number of batch rows processed concurrently
pub const DEFAULT_BATCH_CONCURRENCY: usize = 8;

// History queries
/// Default number of rows returned by history queries
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;
/// Upper bound on rows returned by history queries
pub const MAX_HISTORY_LIMIT: i64 = 500;
/// Default number of days returned by the daily counts query
pub const DEFAULT_HISTORY_DAYS: u32 = 30;
/// Upper bound on days covered by the daily counts query (10 years)
pub const MAX_HISTORY_DAYS: u32 = 3650;

// Input limits
/// Maximum URL length (2048 characters), matching common browser and server limits
pub const MAX_URL_LENGTH: usize = 2048;
/// Maximum error message length in characters (2000 chars)
/// Error messages longer than this are truncated before they are returned or stored
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;
