//! API request and response types

use presence_core::{image_path, StatusState};
use serde::{Deserialize, Serialize};

/// Current status as published on `/api/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Current status label
    pub status: String,

    /// Every status the service accepts, in configured order
    pub allowed: Vec<String>,

    /// Image path derived from the status label
    pub image: String,

    /// Unix timestamp of the last change
    pub updated_at: i64,
}

impl StatusResponse {
    pub fn new(state: StatusState, allowed: &[String]) -> Self {
        Self {
            image: image_path(&state.status),
            status: state.status,
            allowed: allowed.to_vec(),
            updated_at: state.updated_at,
        }
    }
}

/// Query string pairs in request order.
///
/// Repeated keys are kept; lookups resolve to the first occurrence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryPairs(pub Vec<(String, String)>);

impl QueryPairs {
    /// First value given for `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Body accepted by `POST /set`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetStatusRequest {
    /// Desired status
    pub status: String,
}

/// Result of a successful `/set`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStatusResponse {
    /// Always `true`
    pub ok: bool,

    /// The new status
    pub status: String,

    /// Unix timestamp of the change
    pub updated_at: i64,
}

impl From<StatusState> for SetStatusResponse {
    fn from(state: StatusState) -> Self {
        Self {
            ok: true,
            status: state.status,
            updated_at: state.updated_at,
        }
    }
}

/// Liveness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: HealthStatus,

    /// Service version
    pub version: String,

    /// Uptime in seconds
    pub uptime_seconds: u64,

    /// Current presence status
    pub current_status: String,
}

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service is healthy
    Healthy,
}
