//! TLS certificate inspection.
//!
//! This module connects to a host and reports details of the leaf certificate:
//! - Subject and issuer
//! - Validity period (not before/after, ISO-8601 UTC)
//! - Subject Alternative Names (DNS names only)
//! - Negotiated TLS version
//!
//! The first handshake verifies the chain against the webpki roots. When
//! verification fails, a second handshake that accepts any certificate still
//! reports the certificate, flagged `unverified` with the verification error.
//!
//! Uses `tokio-rustls` for async TLS connections and `x509-parser` for certificate parsing.

mod extract;
mod verifier;

use std::sync::Arc;
use std::time::Duration;

use rustls::pki_types::ServerName;
use rustls::{CertificateError, ClientConfig, RootCertStore};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

use crate::config::{TCP_CONNECT_TIMEOUT_SECS, TLS_HANDSHAKE_TIMEOUT_SECS};
use crate::error_handling::TlsError;

use extract::extract_certificate_info;
use verifier::AcceptAnyCertificate;

/// Certificate details reported by the TLS lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInfo {
    /// Issuer distinguished name
    pub issuer: Option<String>,
    /// Subject distinguished name
    pub subject: Option<String>,
    /// Start of validity (ISO-8601 UTC)
    pub not_before: Option<String>,
    /// End of validity (ISO-8601 UTC)
    pub not_after: Option<String>,
    /// Negotiated protocol version, e.g. `TLSv1_3`
    pub tls_version: Option<String>,
    /// DNS names from the SAN extension
    #[serde(default)]
    pub subject_alternative_names: Vec<String>,
    /// Set when the certificate was read through the unverified fallback
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unverified: bool,
    /// Why normal verification failed (only with `unverified`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_error: Option<String>,
}

/// How a single handshake attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HandshakeError {
    /// The peer's certificate was rejected.
    Certificate { expired: bool, message: String },
    /// Anything else: connect, handshake, timeout, parse.
    Other(String),
}

/// Retrieves certificate information for `host:port`.
///
/// # Errors
///
/// - [`TlsError::Connection`] when the host cannot be reached or the
///   handshake fails for reasons unrelated to the certificate
/// - [`TlsError::Expired`] / [`TlsError::Verification`] when verification
///   failed and the unverified fallback could not read the certificate either
pub async fn get_tls_info(host: &str, port: u16) -> Result<CertificateInfo, TlsError> {
    log::debug!("Attempting to get TLS info for {host}:{port}");

    let server_name = ServerName::try_from(host.to_string())
        .map_err(|e| TlsError::Connection(format!("invalid server name {host}: {e}")))?;

    let config = verified_config().map_err(|e| TlsError::Connection(e.to_string()))?;
    let (expired, message) = match handshake(host, port, server_name.clone(), config).await {
        Ok(info) => {
            log::debug!("TLS certificate info extracted for {host}:{port}");
            return Ok(info);
        }
        Err(HandshakeError::Other(message)) => return Err(TlsError::Connection(message)),
        Err(HandshakeError::Certificate { expired, message }) => (expired, message),
    };

    log::debug!("Certificate verification failed for {host}:{port}: {message}; retrying unverified");
    let verification_error = if expired {
        "certificate expired".to_string()
    } else {
        message.clone()
    };

    let fallback = unverified_config().map_err(|e| TlsError::Connection(e.to_string()))?;
    match handshake(host, port, server_name, fallback).await {
        Ok(mut info) => {
            info.unverified = true;
            info.verification_error = Some(verification_error);
            Ok(info)
        }
        Err(e) => {
            log::debug!("Unverified TLS fallback failed for {host}:{port}: {e:?}");
            if expired {
                Err(TlsError::Expired)
            } else {
                Err(TlsError::Verification(message))
            }
        }
    }
}

/// Client configuration that verifies against the webpki root store.
fn verified_config() -> Result<Arc<ClientConfig>, rustls::Error> {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()?
    .with_root_certificates(root_store)
    .with_no_client_auth();

    Ok(Arc::new(config))
}

/// Client configuration that accepts any certificate chain.
fn unverified_config() -> Result<Arc<ClientConfig>, rustls::Error> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());

    let config = ClientConfig::builder_with_provider(Arc::clone(&provider))
        .with_safe_default_protocol_versions()?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate::new(provider)))
        .with_no_client_auth();

    Ok(Arc::new(config))
}

async fn handshake(
    host: &str,
    port: u16,
    server_name: ServerName<'static>,
    config: Arc<ClientConfig>,
) -> Result<CertificateInfo, HandshakeError> {
    let sock = tokio::time::timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        TcpStream::connect((host, port)),
    )
    .await
    .map_err(|_| {
        HandshakeError::Other(format!(
            "TCP connection timeout for {host}:{port} ({TCP_CONNECT_TIMEOUT_SECS}s)"
        ))
    })?
    .map_err(|e| HandshakeError::Other(format!("failed to connect to {host}:{port}: {e}")))?;

    let connector = TlsConnector::from(config);
    let tls_stream = tokio::time::timeout(
        Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
        connector.connect(server_name, sock),
    )
    .await
    .map_err(|_| {
        HandshakeError::Other(format!(
            "TLS handshake timeout for {host}:{port} ({TLS_HANDSHAKE_TIMEOUT_SECS}s)"
        ))
    })?
    .map_err(classify_handshake_error)?;

    let (_, connection) = tls_stream.get_ref();
    let tls_version = connection.protocol_version().map(|v| format!("{v:?}"));

    let cert = connection
        .peer_certificates()
        .and_then(|certs| certs.first())
        .ok_or_else(|| HandshakeError::Other("server presented no certificate".to_string()))?;

    extract_certificate_info(cert.as_ref(), tls_version)
        .map_err(|e| HandshakeError::Other(format!("failed to parse certificate: {e}")))
}

/// Separates certificate rejections from other handshake failures.
///
/// tokio-rustls wraps the `rustls::Error` inside the `io::Error` it returns.
fn classify_handshake_error(error: std::io::Error) -> HandshakeError {
    let rustls_error = error
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<rustls::Error>());

    match rustls_error {
        Some(rustls::Error::InvalidCertificate(cert_error)) => {
            let message = cert_error.to_string();
            let expired = matches!(cert_error, CertificateError::Expired)
                || message.to_lowercase().contains("expired");
            HandshakeError::Certificate { expired, message }
        }
        _ => HandshakeError::Other(format!("TLS handshake failed: {error}")),
    }
}
