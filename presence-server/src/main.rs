//! Presence HTTP Server binary

use anyhow::Context;
use presence_core::{Config, StatusStore, TokenGuard};
use presence_server::{build_router, AppState};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,presence=debug")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting presence server v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .ensure_dirs()
        .context("Failed to create data and content directories")?;
    info!("Allowed statuses: {:?}", config.allowed_statuses);

    // Initialize Prometheus metrics
    presence_server::metrics::init_prometheus()?;
    presence_server::metrics::init_metrics();

    let store = StatusStore::from_config(&config).with_context(|| {
        format!("Failed to load state from {}", config.status_file().display())
    })?;

    let guard = TokenGuard::new(config.auth_token.clone());
    if !guard.is_enabled() {
        warn!("AUTH_TOKEN is not set, /set accepts unauthenticated requests");
    }

    let state = AppState::new(store, guard);
    let app = build_router(state, &config.static_dir);

    info!("Listening on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, shutting down gracefully...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Server shutdown complete");
    Ok(())
}
