//! Persisted status state
//!
//! The current status lives in memory behind a lock and is written to a
//! single JSON document on every change. The file is read once at startup.

use crate::config::Config;
use crate::error::{PresenceError, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The persisted status document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusState {
    /// Current status, always a member of the allow-list
    pub status: String,

    /// Unix timestamp (seconds) of the last change
    #[serde(default)]
    pub updated_at: i64,
}

impl StatusState {
    /// State stamped with the current time
    pub fn now(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            updated_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Read the persisted state, falling back to the first allowed status.
///
/// A file that exists but cannot be read or parsed is an error.
pub fn load(path: &Path, allowed: &[String]) -> Result<StatusState> {
    let default_status = allowed.first().ok_or_else(|| {
        PresenceError::Config("allow-list must contain at least one status".to_string())
    })?;

    if !path.exists() {
        debug!("No state file at {}, using default status", path.display());
        return Ok(StatusState::now(default_status.as_str()));
    }

    let bytes = std::fs::read(path)?;
    let state: StatusState = serde_json::from_slice(&bytes)?;

    if !allowed.contains(&state.status) {
        warn!(
            "Persisted status {:?} is not allowed, resetting to {:?}",
            state.status, default_status
        );
        return Ok(StatusState::now(default_status.as_str()));
    }

    Ok(state)
}

/// Overwrite the state file with `state`
pub fn save(path: &Path, state: &StatusState) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Owner of the single current status
#[derive(Debug)]
pub struct StatusStore {
    path: PathBuf,
    allowed: Arc<[String]>,
    current: Mutex<StatusState>,
}

impl StatusStore {
    /// Load state from `path` and take ownership of it
    pub fn open(path: impl Into<PathBuf>, allowed: Vec<String>) -> Result<Self> {
        let path = path.into();
        let current = load(&path, &allowed)?;
        info!(
            "Loaded status {:?} (updated_at {}) from {}",
            current.status,
            current.updated_at,
            path.display()
        );

        Ok(Self {
            path,
            allowed: allowed.into(),
            current: Mutex::new(current),
        })
    }

    /// Open the store configured by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::open(config.status_file(), config.allowed_statuses.clone())
    }

    /// Snapshot of the current state
    pub fn get(&self) -> StatusState {
        self.current.lock().clone()
    }

    /// The allow-list
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Whether `status` is in the allow-list
    pub fn is_allowed(&self, status: &str) -> bool {
        self.allowed.iter().any(|s| s == status)
    }

    /// Change the current status and persist it.
    ///
    /// The in-memory state only changes once the file has been written.
    pub fn set(&self, status: &str) -> Result<StatusState> {
        if !self.is_allowed(status) {
            return Err(PresenceError::InvalidStatus {
                status: status.to_string(),
                allowed: self.allowed.to_vec(),
            });
        }

        let mut current = self.current.lock();
        let next = StatusState::now(status);
        save(&self.path, &next)?;
        *current = next.clone();

        info!("Status changed to {:?}", next.status);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn allowed() -> Vec<String> {
        vec!["Available".to_string(), "In a meeting".to_string()]
    }

    #[test]
    fn test_default_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.json");

        let before = chrono::Utc::now().timestamp();
        let state = load(&path, &allowed()).unwrap();
        assert_eq!(state.status, "Available");
        assert!(state.updated_at >= before);
        assert!(!path.exists());
    }

    #[test]
    fn test_load_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.json");
        fs::write(&path, r#"{"status":"In a meeting","updated_at":1700000000}"#).unwrap();

        let state = load(&path, &allowed()).unwrap();
        assert_eq!(state.status, "In a meeting");
        assert_eq!(state.updated_at, 1_700_000_000);
    }

    #[test]
    fn test_missing_timestamp_defaults_to_zero() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.json");
        fs::write(&path, r#"{"status":"Available"}"#).unwrap();

        assert_eq!(load(&path, &allowed()).unwrap().updated_at, 0);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.json");
        fs::write(&path, "{not json").unwrap();

        let err = load(&path, &allowed()).unwrap_err();
        assert!(matches!(err, PresenceError::Serialization(_)));
        assert!(StatusStore::open(&path, allowed()).is_err());
    }

    #[test]
    fn test_unknown_persisted_status_resets() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.json");
        fs::write(&path, r#"{"status":"Retired","updated_at":5}"#).unwrap();

        let state = load(&path, &allowed()).unwrap();
        assert_eq!(state.status, "Available");
        assert!(state.updated_at > 5);
    }

    #[test]
    fn test_empty_allow_list_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.json");
        assert!(matches!(load(&path, &[]), Err(PresenceError::Config(_))));
    }

    #[test]
    fn test_set_persists_and_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("status.json");

        let store = StatusStore::open(&path, allowed()).unwrap();
        assert_eq!(store.get().status, "Available");

        let updated = store.set("In a meeting").unwrap();
        assert_eq!(updated.status, "In a meeting");
        assert_eq!(store.get(), updated);

        let on_disk: StatusState = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk, updated);

        let reopened = StatusStore::open(&path, allowed()).unwrap();
        assert_eq!(reopened.get(), updated);
    }

    #[test]
    fn test_set_rejects_unknown_status() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.json");
        let store = StatusStore::open(&path, allowed()).unwrap();
        let before = store.get();

        let err = store.set("Asleep").unwrap_err();
        match err {
            PresenceError::InvalidStatus { status, allowed: list } => {
                assert_eq!(status, "Asleep");
                assert_eq!(list, allowed());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.get(), before);
        assert!(!path.exists());
    }

    #[test]
    fn test_status_match_is_exact() {
        let temp_dir = TempDir::new().unwrap();
        let store = StatusStore::open(temp_dir.path().join("status.json"), allowed()).unwrap();
        assert!(store.is_allowed("Available"));
        assert!(!store.is_allowed("available"));
        assert!(!store.is_allowed(" Available"));
        assert!(!store.is_allowed(""));
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the write fail
        let path = temp_dir.path().join("status.json");
        fs::create_dir(&path).unwrap();

        let store = StatusStore {
            path: path.clone(),
            allowed: allowed().into(),
            current: Mutex::new(StatusState::now("Available")),
        };
        let before = store.get();

        assert!(matches!(store.set("In a meeting"), Err(PresenceError::Io(_))));
        assert_eq!(store.get(), before);
    }

    #[test]
    fn test_non_ascii_is_written_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.json");
        let store = StatusStore::open(&path, vec!["Møte".to_string()]).unwrap();

        store.set("Møte").unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"Møte\""));
    }

    #[test]
    fn test_concurrent_sets_leave_consistent_state() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.json");
        let store = Arc::new(StatusStore::open(&path, allowed()).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let status = if i % 2 == 0 { "Available" } else { "In a meeting" };
                    for _ in 0..20 {
                        store.set(status).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let on_disk: StatusState = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk, store.get());
    }
}
