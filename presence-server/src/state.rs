//! Application state

use presence_core::{StatusStore, TokenGuard};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Owner of the current status
    pub store: Arc<StatusStore>,

    /// Token check for `/set`
    pub guard: Arc<TokenGuard>,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(store: StatusStore, guard: TokenGuard) -> Self {
        Self {
            store: Arc::new(store),
            guard: Arc::new(guard),
            start_time: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
