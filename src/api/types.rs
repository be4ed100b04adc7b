//! API request, query and error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::config::{
    DEFAULT_HISTORY_DAYS, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_DAYS, MAX_HISTORY_LIMIT,
};
use crate::error_handling::{DatabaseError, ResolveError};

/// Body of `POST /resolve`.
///
/// Both fields are optional at the JSON level so that a missing field gets
/// the same `400` as an empty one.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveRequest {
    /// Target name
    #[serde(default)]
    pub name: Option<String>,
    /// Target URL
    #[serde(default)]
    pub url: Option<String>,
}

impl ResolveRequest {
    /// Trimmed `(name, url)`, or `None` when either is missing or blank.
    pub fn fields(&self) -> Option<(&str, &str)> {
        let name = self.name.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let url = self.url.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((name, url))
    }
}

/// `?limit=` for `GET /probes`.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    /// Rows to return
    pub limit: Option<i64>,
}

impl LimitQuery {
    /// The requested limit, defaulted and clamped to `1..=MAX_HISTORY_LIMIT`.
    pub fn effective(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT)
    }
}

/// `?days=` for `GET /probes/daily`.
#[derive(Debug, Default, Deserialize)]
pub struct DaysQuery {
    /// Days to cover, today included
    pub days: Option<u32>,
}

impl DaysQuery {
    /// The requested window, defaulted and clamped to `1..=MAX_HISTORY_DAYS`.
    pub fn effective(&self) -> u32 {
        self.days
            .unwrap_or(DEFAULT_HISTORY_DAYS)
            .clamp(1, MAX_HISTORY_DAYS)
    }
}

/// Errors returned by handlers, rendered as `{"detail": ...}`.
#[derive(Debug)]
pub enum ApiError {
    /// Client error with a message for the caller
    BadRequest(String),
    /// The server was started without a database
    StoreUnavailable,
    /// A store read failed; details are logged, not returned
    Database(DatabaseError),
}

impl From<ResolveError> for ApiError {
    fn from(e: ResolveError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(e: DatabaseError) -> Self {
        ApiError::Database(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::StoreUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "history requires a database (start with --db-path)".to_string(),
            ),
            ApiError::Database(e) => {
                log::error!("History query failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database error".to_string(),
                )
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
