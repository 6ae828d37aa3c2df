// Integration test for configuration file support

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use vcclog::config::{LocatorConfig, StatFailurePolicy};
use vcclog::error::VcclogError;
use vcclog::logs::LogLocator;

#[test]
fn test_load_toml_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("vcclog.toml");

    let toml_content = r#"
        temp_dir = "/var/tmp/buildtools"
        on_stat_error = "abort"
    "#;

    fs::write(&config_path, toml_content).unwrap();

    let config = LocatorConfig::from_file(&config_path).unwrap();
    assert_eq!(config.temp_dir, Some(PathBuf::from("/var/tmp/buildtools")));
    assert_eq!(config.on_stat_error, StatFailurePolicy::Abort);
}

#[test]
fn test_load_json_config_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("vcclog.json");

    fs::write(&config_path, "{}").unwrap();

    let config = LocatorConfig::from_file(&config_path).unwrap();
    assert_eq!(config.temp_dir, None);
    assert_eq!(config.on_stat_error, StatFailurePolicy::Skip);
}

#[test]
fn test_load_config_expands_env_vars() {
    std::env::set_var("VCCLOG_TEST_SCRATCH", "/scratch");

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("vcclog.toml");
    fs::write(&config_path, r#"temp_dir = "${VCCLOG_TEST_SCRATCH}/logs""#).unwrap();

    let config = LocatorConfig::from_file(&config_path).unwrap();
    assert_eq!(config.temp_dir, Some(PathBuf::from("/scratch/logs")));
}

#[test]
fn test_load_invalid_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("vcclog.toml");
    fs::write(&config_path, "temp_dir = [unterminated").unwrap();

    let result = LocatorConfig::from_file(&config_path);
    assert!(matches!(result, Err(VcclogError::InvalidConfig(_))));
}

#[test]
fn test_load_empty_temp_dir_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("vcclog.json");
    fs::write(&config_path, r#"{"temp_dir": ""}"#).unwrap();

    let result = LocatorConfig::from_file(&config_path);
    assert!(matches!(
        result,
        Err(VcclogError::ConfigValidationError(_))
    ));
}

#[tokio::test]
async fn test_config_drives_locator() {
    let scan_dir = TempDir::new().unwrap();
    let log = scan_dir.path().join("dd_client_20240101.log");
    fs::write(&log, b"log").unwrap();

    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("vcclog.json");
    let json = serde_json::json!({ "temp_dir": scan_dir.path() });
    fs::write(&config_path, json.to_string()).unwrap();

    let config = LocatorConfig::from_file(&config_path).unwrap();
    let found = LogLocator::from_config(&config).locate().await.unwrap();
    assert_eq!(found, Some(log));
}
