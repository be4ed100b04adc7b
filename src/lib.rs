//! netlens library: URL resolution with bounded-time network enrichment
//!
//! A probe takes a named URL, normalizes it to host and port, resolves the
//! host to an IP address, and then queries four sources concurrently: WHOIS,
//! GeoIP (RDAP), the TLS certificate and DNS records. Each source has its own
//! time budget; a slow or failing source is reported as data and never fails
//! the probe.
//!
//! # Example
//!
//! ```no_run
//! use netlens::{Config, Prober};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! netlens::initialization::init_crypto_provider();
//! let prober = Prober::from_config(&Config::default());
//!
//! let report = prober.probe("Example", "https://example.com").await?;
//! println!("{} -> {}:{}", report.name, report.ip, report.port);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod api;
pub mod batch;
pub mod config;
pub mod dns;
pub mod enrichment;
pub mod error_handling;
pub mod geoip;
pub mod initialization;
pub mod probe;
pub mod resolve;
pub mod storage;
pub mod tls;
mod utils;
pub mod whois;

// Re-export public API
pub use api::{router, serve_api, ApiState};
pub use batch::{run_batch, BatchOptions, BatchSummary};
pub use config::{Budgets, Cli, Config, LogFormat, LogLevel, TimeoutPolicy};
pub use enrichment::{enrich, AggregateEnrichment, EnrichmentResult, EnrichmentSources, Payload};
pub use error_handling::{DatabaseError, ResolveError};
pub use probe::{ProbeReport, Prober};
pub use storage::Store;
