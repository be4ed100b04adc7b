//! Health and resolution handlers.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::super::types::{ApiError, ResolveRequest};
use super::super::ApiState;
use crate::probe::ProbeReport;

/// Liveness check.
pub async fn healthz_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Resolves and enriches one target.
///
/// The report is returned as soon as enrichment settles; recording it in the
/// store happens on a background task.
pub async fn resolve_handler(
    State(state): State<ApiState>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<ProbeReport>, ApiError> {
    let (name, url) = request
        .fields()
        .ok_or_else(|| ApiError::BadRequest("name and url are required".to_string()))?;

    let report = state.prober.probe(name, url).await.map_err(|e| {
        log::warn!("Failed to resolve {name} ({url}): {e}");
        ApiError::from(e)
    })?;

    log::info!("Resolved {name} ({url}) to {}:{}", report.ip, report.port);

    if state.prober.store().is_some() {
        let prober = state.prober.clone();
        let (name, url, recorded) = (name.to_string(), url.to_string(), report.clone());
        tokio::spawn(async move {
            prober.record(&name, &url, &recorded).await;
        });
    }

    Ok(Json(report))
}
