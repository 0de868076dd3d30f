//! Startup configuration
//!
//! Everything here is read once when the process starts and never changes
//! afterwards. Components receive the pieces they need explicitly.

use crate::error::{PresenceError, Result};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Allow-list used when `ALLOWED_STATUSES` is not set
pub const DEFAULT_ALLOWED_STATUSES: &str = "Available,In a meeting,Out on assignment";

/// Default listen address: all interfaces, fixed port
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Name of the persisted state file inside the data directory
pub const STATUS_FILE_NAME: &str = "status.json";

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Ordered allow-list; the first entry is the default status
    pub allowed_statuses: Vec<String>,

    /// Shared secret for `/set`; `None` disables authorization
    pub auth_token: Option<String>,

    /// Directory holding `status.json`
    pub data_dir: PathBuf,

    /// Directory holding the static pages and `content/` images
    pub static_dir: PathBuf,

    /// Address the HTTP server binds to
    pub bind_address: SocketAddr,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` to resolve variable names
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_statuses =
            lookup("ALLOWED_STATUSES").unwrap_or_else(|| DEFAULT_ALLOWED_STATUSES.to_string());
        let allowed_statuses = parse_status_list(&raw_statuses);
        if allowed_statuses.is_empty() {
            return Err(PresenceError::Config(
                "ALLOWED_STATUSES must contain at least one status".to_string(),
            ));
        }

        let auth_token = lookup("AUTH_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let data_dir = lookup("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));
        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("static"));

        let raw_addr = lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = raw_addr.parse().map_err(|e| {
            PresenceError::Config(format!("invalid BIND_ADDRESS {:?}: {}", raw_addr, e))
        })?;

        Ok(Self {
            allowed_statuses,
            auth_token,
            data_dir,
            static_dir,
            bind_address,
        })
    }

    /// Path of the persisted state file
    pub fn status_file(&self) -> PathBuf {
        self.data_dir.join(STATUS_FILE_NAME)
    }

    /// Directory the status images are served from
    pub fn content_dir(&self) -> PathBuf {
        self.static_dir.join("content")
    }

    /// Create the data and content directories if they are missing
    pub fn ensure_dirs(&self) -> Result<()> {
        create_dir(&self.data_dir)?;
        create_dir(&self.content_dir())?;
        Ok(())
    }
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn parse_status_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
