//! Config save/load roundtrip integration tests.
//!
//! These tests verify that configuration can be serialized, written to disk,
//! and loaded back with identical field values.

use lockbox_core::config::{Config, LogLevel, DEFAULT_QUEUE_NAME, DEFAULT_QUEUE_NAMESPACE};
use lockbox_core::SecretString;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lockbox.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.queue.url, config.queue.url);
    assert_eq!(loaded.queue.namespace, DEFAULT_QUEUE_NAMESPACE);
    assert_eq!(loaded.queue.name, DEFAULT_QUEUE_NAME);
    assert_eq!(loaded.notifications.frontend_url, config.notifications.frontend_url);
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lockbox.json5");

    let mut config = Config::default();
    config.queue.namespace = "vault".to_string();
    config.queue.username = Some("worker".to_string());
    config.queue.password = Some(SecretString::new("hunter2"));
    config.logging.level = LogLevel::Debug;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.queue.namespace, "vault");
    assert_eq!(loaded.queue.username.as_deref(), Some("worker"));
    assert_eq!(
        loaded.queue.password.as_ref().map(|p| p.expose_secret()),
        Some("hunter2")
    );
    assert_eq!(loaded.logging.level, LogLevel::Debug);
    loaded.validate().unwrap();
}

#[test]
fn test_config_resolve_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::resolve(Some(&dir.path().join("absent.json5"))).unwrap();
    assert_eq!(config.queue.name, DEFAULT_QUEUE_NAME);
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/lockbox.json5"));
    assert!(result.is_err());
}

#[test]
fn test_config_parse_invalid() {
    let result = Config::parse("not valid json");
    assert!(result.is_err());
}
