//! Certificate extraction utilities.

use anyhow::{anyhow, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::{GeneralName, ParsedExtension};
use x509_parser::time::ASN1Time;

use super::CertificateInfo;

/// Parses a DER-encoded leaf certificate into the reported fields.
pub(crate) fn extract_certificate_info(
    der: &[u8],
    tls_version: Option<String>,
) -> Result<CertificateInfo> {
    let (_, cert) = x509_parser::parse_x509_certificate(der)?;

    Ok(CertificateInfo {
        issuer: Some(cert.issuer().to_string()),
        subject: Some(cert.subject().to_string()),
        not_before: Some(asn1_time_to_iso(&cert.validity().not_before)?),
        not_after: Some(asn1_time_to_iso(&cert.validity().not_after)?),
        tls_version,
        subject_alternative_names: extract_certificate_sans(&cert),
        unverified: false,
        verification_error: None,
    })
}

/// Extracts DNS names from the Subject Alternative Name extension.
///
/// IP addresses, email addresses and other name types are ignored.
pub(crate) fn extract_certificate_sans(cert: &X509Certificate<'_>) -> Vec<String> {
    let mut sans = Vec::new();

    for ext in cert.extensions() {
        if let ParsedExtension::SubjectAlternativeName(ref san) = ext.parsed_extension() {
            for general_name in &san.general_names {
                if let GeneralName::DNSName(dns_name) = general_name {
                    sans.push(dns_name.to_string());
                }
            }
        }
    }

    sans
}

/// Formats a certificate validity bound as ISO-8601 UTC (`2025-01-31T12:00:00Z`).
pub(crate) fn asn1_time_to_iso(time: &ASN1Time) -> Result<String> {
    unix_to_iso(time.timestamp())
}

fn unix_to_iso(timestamp: i64) -> Result<String> {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .ok_or_else(|| anyhow!("certificate time out of range: {timestamp}"))
}
