//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger
//! - HTTP client (RDAP)
//! - DNS resolver
//! - Crypto provider for `rustls`

mod client;
mod logger;
mod resolver;

use rustls::crypto::{ring::default_provider, CryptoProvider};

// Re-export public API
pub use client::{init_client, USER_AGENT};
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Initializes the crypto provider for TLS operations.
///
/// Installs `ring` as the process-wide `rustls` provider, used by `reqwest`
/// and `sqlx`. The TLS lookup builds its configs with an explicit provider and
/// does not depend on this. Must run before any client is built.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_crypto_provider_is_idempotent() {
        init_crypto_provider();
        init_crypto_provider();
        assert!(CryptoProvider::get_default().is_some());
    }

    #[test]
    fn test_init_client() {
        init_crypto_provider();
        assert!(init_client().is_ok());
    }

    #[test]
    fn test_user_agent_has_version() {
        assert!(USER_AGENT.starts_with("netlens/"));
        assert!(USER_AGENT.len() > "netlens/".len());
    }

    #[tokio::test]
    async fn test_init_resolver() {
        let resolver = init_resolver();
        // An IP literal never reaches the network
        let lookup = resolver.lookup_ip("127.0.0.1").await.unwrap();
        assert!(lookup.iter().any(|ip| ip.is_loopback()));
    }
}
