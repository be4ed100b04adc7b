//! Parallel enrichment of a resolved target.
//!
//! Four independent, slow and unreliable lookups (WHOIS, GeoIP, TLS, DNS) run
//! concurrently under per-source budgets. A slow or hanging source never holds
//! up the others or the caller beyond its own budget, and the caller always
//! gets a result for every source.
//!
//! [`EnrichmentSources`] is the seam between the coordinator and the lookups;
//! [`NetworkSources`] wires in the real ones.

mod coordinator;
mod sources;
mod types;

// Re-export public API
pub use coordinator::enrich;
pub use sources::{EnrichmentSources, NetworkSources};
pub use types::{error_payload, AggregateEnrichment, EnrichmentResult, Payload, Source};
