//! URL normalization.

use url::{Host, ParseError, Url};

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::ResolveError;

/// Scheme assumed when the input has none.
const DEFAULT_SCHEME: &str = "http";

/// Host and port extracted from a user-supplied URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Lower-cased hostname; empty when the URL has no authority
    pub host: String,
    /// Explicit port, else 443 for https, else 80
    pub port: u16,
}

/// Normalizes a raw URL into a host and port.
///
/// - A missing scheme means `http://`.
/// - An explicit port wins; otherwise `https` (case-insensitive) maps to 443
///   and every other scheme maps to 80.
/// - The host is lower-cased; IPv6 literals come back without brackets.
/// - A URL without an authority (`http://`) yields an empty host. That is a
///   valid return value here; callers reject it as a missing host.
///
/// # Errors
///
/// Returns `ResolveError::InvalidUrl` when the URL is too long or cannot be
/// parsed (bad port, illegal host characters, ...).
pub fn normalize(raw: &str) -> Result<ResolvedTarget, ResolveError> {
    let trimmed = raw.trim();
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(ResolveError::InvalidUrl(format!(
            "url exceeds maximum length ({} > {})",
            trimmed.len(),
            MAX_URL_LENGTH
        )));
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME}://{trimmed}")
    };

    let parsed = match Url::parse(&with_scheme) {
        Ok(parsed) => parsed,
        Err(ParseError::EmptyHost) => {
            // "http://" and friends: no authority at all
            let scheme = scheme_of(&with_scheme);
            return Ok(ResolvedTarget {
                host: String::new(),
                port: default_port(&scheme),
            });
        }
        Err(e) => return Err(ResolveError::InvalidUrl(e.to_string())),
    };

    let host = match parsed.host() {
        Some(Host::Domain(domain)) => domain.to_lowercase(),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => addr.to_string(),
        None => String::new(),
    };

    // The url crate drops a port equal to the scheme's known default, so an
    // explicit "ftp://host:21" has to be recovered from the authority text.
    let port = parsed
        .port()
        .or_else(|| explicit_port(&with_scheme))
        .unwrap_or_else(|| default_port(parsed.scheme()));

    Ok(ResolvedTarget { host, port })
}

fn scheme_of(url: &str) -> String {
    url.split("://")
        .next()
        .unwrap_or(DEFAULT_SCHEME)
        .to_ascii_lowercase()
}

fn default_port(scheme: &str) -> u16 {
    if scheme.eq_ignore_ascii_case("https") {
        443
    } else {
        80
    }
}

/// Reads a `:port` suffix from the authority part of `url`, if present.
fn explicit_port(url: &str) -> Option<u16> {
    let rest = url.split_once("://")?.1;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit('@').next()?;
    // Skip the colons inside an IPv6 literal
    let after_host = match host_port.rfind(']') {
        Some(idx) => &host_port[idx + 1..],
        None => host_port,
    };
    let (_, port) = after_host.rsplit_once(':')?;
    port.parse().ok()
}
