//! Error types for the presence service

use thiserror::Error;

/// Main error type for presence operations
#[derive(Error, Debug)]
pub enum PresenceError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested status is not in the allow-list
    #[error("Invalid status: {status:?}")]
    InvalidStatus {
        status: String,
        allowed: Vec<String>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for presence operations
pub type Result<T> = std::result::Result<T, PresenceError>;
