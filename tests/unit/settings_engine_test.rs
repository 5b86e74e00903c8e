//! Integration-level unit tests for the SettingsEngine public API.
//!
//! Exercises default loading, validated updates, persistence and reset
//! through the public trait interface.

use labelmarks::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use labelmarks::types::errors::SettingsError;
use labelmarks::types::settings::{LoaderSettings, DEFAULT_SOURCE_URL};
use serde_json::json;
use tempfile::TempDir;

/// Helper: an engine whose config file lives in `dir`.
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("nested")
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, LoaderSettings::default());
    assert_eq!(settings.source_url, DEFAULT_SOURCE_URL);
    assert_eq!(settings.ttl_millis, 86_400_000);
}

#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();
    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine.set_value("ttl_millis", json!(3_600_000)).unwrap();
        engine
            .set_value("database_path", json!("/var/tmp/labelmarks.db"))
            .unwrap();
    }

    let mut reopened = engine_in_temp(&dir);
    let settings = reopened.load().unwrap();
    assert_eq!(settings.ttl_millis, 3_600_000);
    assert_eq!(settings.database_path.as_deref(), Some("/var/tmp/labelmarks.db"));
}

#[test]
fn test_unknown_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    assert!(matches!(
        engine.set_value("theme", json!("dark")),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("", json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
}

#[test]
fn test_invalid_values_leave_settings_untouched() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    for (key, value) in [
        ("ttl_millis", json!("a day")),
        ("ttl_millis", json!(0)),
        ("source_url", json!("file:///tmp/export.xml")),
        ("request_timeout_secs", json!(0)),
    ] {
        assert!(
            matches!(engine.set_value(key, value.clone()), Err(SettingsError::InvalidValue(_))),
            "{} = {} should be rejected",
            key,
            value
        );
    }
    assert_eq!(engine.get_settings(), &LoaderSettings::default());
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    let path = std::path::PathBuf::from(engine.get_config_path());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"ttl_millis": 1000}"#).unwrap();

    let settings = engine.load().unwrap();
    assert_eq!(settings.ttl_millis, 1000);
    assert_eq!(settings.source_url, DEFAULT_SOURCE_URL);
}

#[test]
fn test_malformed_file_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    let path = std::path::PathBuf::from(engine.get_config_path());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(engine.load(), Err(SettingsError::SerializationError(_))));
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.set_value("request_timeout_secs", json!(5)).unwrap();

    engine.reset().unwrap();

    let mut reopened = engine_in_temp(&dir);
    assert_eq!(reopened.load().unwrap(), LoaderSettings::default());
}
