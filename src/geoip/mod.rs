//! GeoIP lookup over RDAP.
//!
//! Resolves an IP address to the country and organization of the network
//! it belongs to by querying an RDAP server (RFC 9083). The default endpoint
//! is the `rdap.org` bootstrap redirector, which forwards to the responsible
//! regional internet registry.

mod lookup;
mod types;

// Re-export public API
pub use lookup::lookup_geoip;
pub use types::GeoIpInfo;
