//! Presence core - status state, configuration and access control
//!
//! This crate holds everything the presence service needs that is not HTTP:
//! the allow-list configuration, the persisted status store, the label slug
//! transform and the shared-secret token guard.

pub mod auth;
pub mod config;
pub mod error;
pub mod slug;
pub mod store;

pub use auth::TokenGuard;
pub use config::Config;
pub use error::{PresenceError, Result};
pub use slug::{image_path, slugify};
pub use store::{StatusState, StatusStore};
