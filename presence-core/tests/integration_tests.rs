//! End-to-end tests for configuration, store and slug working together

use presence_core::{image_path, slugify, Config, PresenceError, StatusStore, TokenGuard};
use std::collections::HashMap;
use tempfile::TempDir;

fn config_in(temp_dir: &TempDir, statuses: &str, token: &str) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("ALLOWED_STATUSES", statuses.to_string()),
        ("AUTH_TOKEN", token.to_string()),
        ("DATA_DIR", temp_dir.path().join("data").display().to_string()),
        ("STATIC_DIR", temp_dir.path().join("static").display().to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

#[test]
fn test_first_run_uses_default_status() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir, "Tilgjengelig,Møte,Ute på oppdrag", "");
    config.ensure_dirs().unwrap();

    let store = StatusStore::from_config(&config).unwrap();
    assert_eq!(store.get().status, "Tilgjengelig");
    assert_eq!(store.allowed(), config.allowed_statuses.as_slice());
}

#[test]
fn test_every_status_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir, "Tilgjengelig,Møte,Ute på oppdrag", "");

    for status in &config.allowed_statuses {
        let store =
            StatusStore::open(config.status_file(), config.allowed_statuses.clone()).unwrap();
        let written = store.set(status).unwrap();
        drop(store);

        let reopened =
            StatusStore::open(config.status_file(), config.allowed_statuses.clone()).unwrap();
        assert_eq!(reopened.get(), written);
        assert_eq!(
            image_path(&reopened.get().status),
            format!("/static/content/{}.png", slugify(status))
        );
    }
}

#[test]
fn test_rejected_status_does_not_touch_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir, "Available,In a meeting", "");
    let store = StatusStore::open(config.status_file(), config.allowed_statuses.clone()).unwrap();
    let first = store.set("In a meeting").unwrap();
    let raw_before = std::fs::read(config.status_file()).unwrap();

    assert!(matches!(
        store.set("Gone fishing"),
        Err(PresenceError::InvalidStatus { .. })
    ));
    assert_eq!(std::fs::read(config.status_file()).unwrap(), raw_before);
    assert_eq!(store.get(), first);
}

#[test]
fn test_corrupt_state_blocks_startup() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir, "Available", "");
    config.ensure_dirs().unwrap();
    std::fs::write(config.status_file(), "]]").unwrap();

    let err = StatusStore::open(config.status_file(), config.allowed_statuses.clone()).unwrap_err();
    assert!(matches!(err, PresenceError::Serialization(_)));
}

#[test]
fn test_guard_follows_configured_token() {
    let temp_dir = TempDir::new().unwrap();

    let open = TokenGuard::new(config_in(&temp_dir, "Available", " ").auth_token);
    assert!(open.authorize(None, None));

    let locked = TokenGuard::new(config_in(&temp_dir, "Available", "hunter2").auth_token);
    assert!(!locked.authorize(None, None));
    assert!(locked.authorize(Some("Bearer hunter2"), None));
    assert!(locked.authorize(None, Some("hunter2")));
}
