//! Error handling.
//!
//! This module provides the typed errors for the places a request or the
//! process can fail outright:
//! - **Initialization**: logger, HTTP client, DNS resolver setup
//! - **Resolution**: invalid URL or unresolvable host (aborts one request)
//! - **Database**: persistence failures (logged and swallowed on the request path)
//! - **TLS**: certificate lookup failures, rendered into the `tls` error payload
//!
//! Enrichment failures and timeouts are deliberately absent: they are carried
//! as data in [`crate::enrichment::EnrichmentResult`].

mod types;

// Re-export public API
pub use types::{DatabaseError, InitializationError, ResolveError, TlsError};
