//! Token check middleware for mutating routes

use axum::{
    extract::{Query, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::QueryPairs;
use crate::error::ApiError;
use crate::state::AppState;

/// Axum middleware that accepts `Authorization: Bearer <token>` or `?token=<token>`.
///
/// When `token` is repeated in the query only the first value counts.
pub async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let params = Query::<QueryPairs>::try_from_uri(request.uri())
        .map(|Query(p)| p)
        .unwrap_or_default();

    if state.guard.authorize(header, params.first("token")) {
        return next.run(request).await;
    }

    warn!("Rejected unauthorized {} {}", request.method(), request.uri().path());
    ApiError::Unauthorized("A valid token is required".to_string()).into_response()
}
