//! Presence HTTP Server - read and change the current presence status
//!
//! Anyone may read the status; changing it requires the shared token when
//! one is configured.

pub mod api;
pub mod app;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod state;

pub use api::{HealthResponse, SetStatusRequest, SetStatusResponse, StatusResponse};
pub use app::build_router;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
