//! Forward name resolution.

use std::net::IpAddr;

use futures::future::BoxFuture;

use crate::error_handling::ResolveError;

/// Resolves a hostname to a single IP address string.
///
/// Production code uses [`SystemResolver`]; tests substitute fixed or failing
/// implementations.
pub trait AddressResolver: Send + Sync {
    /// Resolves `host` to one IP address.
    fn resolve<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Result<String, ResolveError>>;
}

/// Resolver backed by the operating system (getaddrinfo).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl AddressResolver for SystemResolver {
    fn resolve<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Result<String, ResolveError>> {
        Box::pin(resolve_address(host))
    }
}

/// Resolves a hostname to an IP address using the system resolver.
///
/// The lookup runs on tokio's blocking pool. When the name has several
/// addresses the first one returned wins; there is no retry, no caching and
/// no rotation across addresses.
///
/// # Errors
///
/// - `ResolveError::InvalidUrl("missing host")` for an empty host
/// - `ResolveError::Resolution` carrying the resolver's message when the
///   lookup fails or returns no addresses
pub async fn resolve_address(host: &str) -> Result<String, ResolveError> {
    if host.is_empty() {
        return Err(ResolveError::missing_host());
    }

    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip.to_string());
    }

    let mut addrs = tokio::net::lookup_host((host, 0)).await.map_err(|e| {
        log::debug!("Name resolution failed for {host}: {e}");
        ResolveError::Resolution(e.to_string())
    })?;

    addrs
        .next()
        .map(|addr| addr.ip().to_string())
        .ok_or_else(|| ResolveError::Resolution(format!("no addresses found for {host}")))
}
