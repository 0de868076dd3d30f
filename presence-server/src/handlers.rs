//! HTTP request handlers

use crate::api::{
    HealthResponse, HealthStatus, QueryPairs, SetStatusRequest, SetStatusResponse, StatusResponse,
};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// Current status, allow-list and image path
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    crate::metrics::record_status_read();
    let current = state.store.get();
    Json(StatusResponse::new(current, state.store.allowed()))
}

/// `GET /set?status=<value>`
pub async fn set_status_query(
    State(state): State<AppState>,
    Query(params): Query<QueryPairs>,
) -> ApiResult<Json<SetStatusResponse>> {
    // A missing parameter is validated like any other unknown value
    let requested = params.first("status").unwrap_or_default().to_string();
    apply_status(&state, requested).await
}

/// `POST /set` with `{"status": <value>}`.
///
/// The body is parsed as JSON whatever the `Content-Type` says.
pub async fn set_status_json(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<SetStatusResponse>> {
    let req: SetStatusRequest =
        serde_json::from_slice(&body).map_err(|source| ApiError::InvalidJson {
            source,
            allowed: state.store.allowed().to_vec(),
        })?;
    apply_status(&state, req.status).await
}

async fn apply_status(state: &AppState, requested: String) -> ApiResult<Json<SetStatusResponse>> {
    debug!("Set status request: {:?}", requested);

    // The store writes the state file synchronously
    let store = Arc::clone(&state.store);
    let updated = tokio::task::spawn_blocking(move || store.set(&requested))
        .await
        .map_err(|e| ApiError::Internal(format!("Status update task failed: {}", e)))??;
    crate::metrics::record_status_change(&updated.status, updated.updated_at);

    Ok(Json(updated.into()))
}

/// Health check - liveness probe
pub async fn health_live(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        current_status: state.store.get().status,
    })
}

/// Prometheus metrics endpoint
pub async fn metrics() -> String {
    crate::metrics::get_prometheus_metrics()
}
