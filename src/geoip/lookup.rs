//! RDAP IP lookup.

use anyhow::{bail, Context, Result};
use reqwest::header::ACCEPT;
use std::net::IpAddr;

use super::types::{GeoIpInfo, RdapNetwork};

/// Looks up the network registration for `ip` via RDAP.
///
/// `rdap_url` is the IP query base (e.g. `https://rdap.org/ip/`); the address
/// is appended to it. The client's own timeout bounds the request.
///
/// # Errors
///
/// Returns an error if `ip` is not an IP address, the request fails, the
/// server answers with a non-success status, or the body is not RDAP JSON.
pub async fn lookup_geoip(client: &reqwest::Client, rdap_url: &str, ip: &str) -> Result<GeoIpInfo> {
    let addr: IpAddr = ip
        .trim()
        .parse()
        .with_context(|| format!("invalid IP address: {ip}"))?;
    let url = query_url(rdap_url, &addr);

    log::debug!("Querying RDAP for {addr}: {url}");
    let response = client
        .get(&url)
        .header(ACCEPT, "application/rdap+json, application/json")
        .send()
        .await
        .with_context(|| format!("RDAP request for {addr} failed"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("RDAP query for {addr} returned HTTP {status}");
    }

    let network: RdapNetwork = response
        .json()
        .await
        .with_context(|| format!("invalid RDAP response for {addr}"))?;

    Ok(GeoIpInfo::from(network))
}

pub(crate) fn query_url(rdap_url: &str, addr: &IpAddr) -> String {
    if rdap_url.ends_with('/') {
        format!("{rdap_url}{addr}")
    } else {
        format!("{rdap_url}/{addr}")
    }
}
