//! URL normalization and name resolution.
//!
//! This is the first step of every probe:
//! - [`normalize`] turns a user-supplied URL into a host and port
//! - [`resolve_address`] turns the host into a single IP address
//!
//! Both steps fail fast with a [`ResolveError`](crate::error_handling::ResolveError);
//! neither retries.

mod address;
mod target;

// Re-export public API
pub use address::{resolve_address, AddressResolver, SystemResolver};
pub use target::{normalize, ResolvedTarget};
