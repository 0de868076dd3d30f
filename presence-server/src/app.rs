//! Router construction

use crate::{auth, handlers, AppState};
use axum::{
    middleware,
    routing::{get, get_service},
    Router,
};
use std::path::Path;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Build the full application router.
///
/// `static_dir` holds `index.html`, `control.html` and the `content/`
/// images referenced by `/api/status`.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let set_routes = Router::new()
        .route(
            "/set",
            get(handlers::set_status_query).post(handlers::set_status_json),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ));

    Router::new()
        // Static pages
        .route(
            "/",
            get_service(ServeFile::new(static_dir.join("index.html"))),
        )
        .route(
            "/control.html",
            get_service(ServeFile::new(static_dir.join("control.html"))),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        // Status API
        .route("/api/status", get(handlers::get_status))
        .merge(set_routes)
        // Health checks
        .route("/health/live", get(handlers::health_live))
        // Metrics
        .route("/metrics", get(handlers::metrics))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
