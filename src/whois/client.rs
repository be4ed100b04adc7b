//! Port-43 WHOIS client.

use anyhow::{anyhow, Context, Result};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::{IANA_WHOIS_SERVER, MAX_WHOIS_RESPONSE_SIZE, WHOIS_TIMEOUT_SECS};

use super::parse::extract_referral;

const WHOIS_PORT: u16 = 43;

/// Sends one query to a WHOIS server and returns the full response text.
///
/// Connect, write and read share a single deadline. The response is capped at
/// [`MAX_WHOIS_RESPONSE_SIZE`] bytes and decoded lossily, since many servers
/// answer in Latin-1.
pub(crate) async fn query_whois(server: &str, query: &str) -> Result<String> {
    query_server(server, WHOIS_PORT, query).await
}

async fn query_server(server: &str, port: u16, query: &str) -> Result<String> {
    let exchange = async {
        let mut stream = TcpStream::connect((server, port))
            .await
            .with_context(|| format!("failed to connect to WHOIS server {server}"))?;
        stream
            .write_all(format!("{query}\r\n").as_bytes())
            .await
            .context("failed to send WHOIS query")?;

        let mut response = Vec::new();
        stream
            .take(MAX_WHOIS_RESPONSE_SIZE as u64)
            .read_to_end(&mut response)
            .await
            .context("failed to read WHOIS response")?;
        Ok::<_, anyhow::Error>(response)
    };

    let response = tokio::time::timeout(Duration::from_secs(WHOIS_TIMEOUT_SECS), exchange)
        .await
        .map_err(|_| anyhow!("WHOIS query to {server} timed out ({WHOIS_TIMEOUT_SECS}s)"))??;

    Ok(String::from_utf8_lossy(&response).into_owned())
}

/// Follows the referral chain for `domain` and returns the combined response.
///
/// 1. IANA, asked for the TLD, names the registry server (`refer:`)
/// 2. The registry answers for the domain
/// 3. When the registry names a registrar server, that server is asked too
///
/// The registrar response (when available) comes first in the returned text.
/// A failing registrar server is logged and ignored.
pub(crate) async fn lookup_raw(domain: &str) -> Result<String> {
    let tld = domain
        .rsplit('.')
        .next()
        .filter(|tld| !tld.is_empty())
        .ok_or_else(|| anyhow!("no TLD in {domain}"))?;

    let iana = query_whois(IANA_WHOIS_SERVER, tld).await?;
    let registry = extract_referral(&iana, &["refer:", "whois:"])
        .ok_or_else(|| anyhow!("no WHOIS server known for .{tld}"))?;
    log::debug!("WHOIS registry for .{tld}: {registry}");

    let registry_raw = query_whois(&registry, domain).await?;

    let registrar = extract_referral(&registry_raw, &["Registrar WHOIS Server:", "Whois Server:"])
        .filter(|server| server != &registry && !server.is_empty());
    let Some(registrar) = registrar else {
        return Ok(registry_raw);
    };

    log::debug!("WHOIS referral for {domain}: re-querying via {registrar}");
    match query_whois(&registrar, domain).await {
        Ok(registrar_raw) if !registrar_raw.trim().is_empty() => {
            Ok(format!("{registrar_raw}\n{registry_raw}"))
        }
        Ok(_) => Ok(registry_raw),
        Err(e) => {
            log::debug!("Registrar WHOIS lookup via {registrar} failed for {domain}: {e:#}");
            Ok(registry_raw)
        }
    }
}
