//! HTTP API.
//!
//! Endpoints:
//! - `GET /healthz` - liveness
//! - `POST /resolve` - resolve and enrich one `{name, url}` target
//! - `GET /probes` - recent probes (`?limit=`)
//! - `GET /probes/daily` - probes per day (`?days=`)
//! - `GET /probes/summary` - store totals
//!
//! The history endpoints answer `503` when the server has no database.

mod handlers;
mod types;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::probe::Prober;

use handlers::{
    daily_handler, healthz_handler, probes_handler, resolve_handler, summary_handler,
};
pub use types::{ApiError, DaysQuery, LimitQuery, ResolveRequest};

/// Shared state for the API handlers.
#[derive(Clone)]
pub struct ApiState {
    prober: Arc<Prober>,
}

impl ApiState {
    /// Wraps a prober (and its optional store) for the handlers.
    pub fn new(prober: Prober) -> Self {
        Self {
            prober: Arc::new(prober),
        }
    }
}

/// Builds the router.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route("/resolve", post(resolve_handler))
        .route("/probes", get(probes_handler))
        .route("/probes/daily", get(daily_handler))
        .route("/probes/summary", get(summary_handler))
        .with_state(state)
}

/// Serves the API on `addr` until `shutdown` is cancelled.
pub async fn serve_api(
    addr: &str,
    state: ApiState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind API server to {}: {}", addr, e))?;

    let local = listener.local_addr()?;
    log::info!("API listening on http://{}/", local);
    log::info!("  - Resolve: POST http://{}/resolve", local);
    log::info!("  - History: GET http://{}/probes", local);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

    log::info!("API server stopped");
    Ok(())
}
