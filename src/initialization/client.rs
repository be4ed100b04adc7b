//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::RDAP_TIMEOUT_SECS;
use crate::error_handling::InitializationError;

/// User-Agent sent with RDAP queries.
pub const USER_AGENT: &str = concat!("netlens/", env!("CARGO_PKG_VERSION"));

/// Initializes the HTTP client used for RDAP queries.
///
/// Creates a `reqwest::Client` configured with:
/// - a `netlens/<version>` User-Agent
/// - a whole-request timeout of [`RDAP_TIMEOUT_SECS`]
/// - redirect following (the `rdap.org` bootstrap answers with redirects)
/// - Rustls TLS backend (no native TLS)
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client() -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(RDAP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()?;
    Ok(Arc::new(client))
}
