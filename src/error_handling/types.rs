//! Error type definitions.
//!
//! This module defines the typed errors used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Schema migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// Enrichment payload could not be serialized for storage.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Errors that abort a single resolution request.
///
/// Per-source enrichment problems are never represented here: they are data
/// in the returned aggregate, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The URL could not be parsed, or it has no host.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Name resolution failed (NXDOMAIN, network error, no addresses).
    #[error("{0}")]
    Resolution(String),
}

impl ResolveError {
    /// Shorthand for the error reported when a URL normalizes to an empty host.
    pub fn missing_host() -> Self {
        ResolveError::InvalidUrl("missing host".to_string())
    }
}

/// Errors reported by the TLS certificate lookup.
///
/// The display strings are the exact `error` payloads returned to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TlsError {
    /// The certificate is expired and no unverified handshake succeeded.
    #[error("TLS certificate expired")]
    Expired,

    /// Certificate verification failed for a reason other than expiry.
    #[error("TLS verification failed: {0}")]
    Verification(String),

    /// Connection, handshake or parsing failure.
    #[error("TLS failed: {0}")]
    Connection(String),
}
