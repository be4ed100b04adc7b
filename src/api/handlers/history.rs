//! Read-only history handlers backed by the store.

use axum::extract::{Query, State};
use axum::Json;

use super::super::types::{ApiError, DaysQuery, LimitQuery};
use super::super::ApiState;
use crate::storage::{DailyCount, HistorySummary, ProbeHistoryRow, Store};

fn store(state: &ApiState) -> Result<&Store, ApiError> {
    state.prober.store().ok_or(ApiError::StoreUnavailable)
}

/// Most recent probes, newest first.
pub async fn probes_handler(
    State(state): State<ApiState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<ProbeHistoryRow>>, ApiError> {
    let rows = store(&state)?.recent_probes(query.effective()).await?;
    Ok(Json(rows))
}

/// Probes per day.
pub async fn daily_handler(
    State(state): State<ApiState>,
    Query(query): Query<DaysQuery>,
) -> Result<Json<Vec<DailyCount>>, ApiError> {
    let counts = store(&state)?.daily_counts(query.effective()).await?;
    Ok(Json(counts))
}

/// Store-wide totals.
pub async fn summary_handler(
    State(state): State<ApiState>,
) -> Result<Json<HistorySummary>, ApiError> {
    Ok(Json(store(&state)?.summary().await?))
}
