//! Loading options from config files and the environment.

use eloader_config::{ConfigDiscovery, ConfigError};
use serde_json::json;
use std::env;
use std::fs;
use std::path::Path;
use serial_test::serial;
use tempfile::TempDir;

#[test]
fn missing_config_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let options = ConfigDiscovery::new(dir.path()).with_env(false).load().unwrap();

    assert_eq!(options.entry, Path::new("src/background.ts"));
    assert_eq!(
        options.build.builder_config().unwrap()["directories"]["output"],
        json!(dir.path().join("release"))
    );
}

#[test]
fn loads_toml_overrides() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("eloader.toml"),
        r#"
entry = "src/main.ts"
target = "node18"

[build.config]
productName = "Notes"
"#,
    )
    .unwrap();

    let options = ConfigDiscovery::new(dir.path()).with_env(false).load().unwrap();
    assert_eq!(options.entry, Path::new("src/main.ts"));
    assert_eq!(options.target, "node18");
    let config = options.build.builder_config().unwrap();
    assert_eq!(config["productName"], "Notes");
    assert_eq!(config["asar"], true);
}

#[test]
fn loads_json_overrides() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("eloader.json"),
        r#"{"bundle": false, "externals": ["electron", "keytar"]}"#,
    )
    .unwrap();

    let options = ConfigDiscovery::new(dir.path()).with_env(false).load().unwrap();
    assert!(!options.bundle);
    assert_eq!(options.externals, vec!["electron", "keytar"]);
}

#[test]
fn loads_package_json_field() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "notes", "main": "index.js", "eloader": {"platform": "neutral"}}"#,
    )
    .unwrap();

    let options = ConfigDiscovery::new(dir.path()).with_env(false).load().unwrap();
    assert_eq!(options.platform, "neutral");
    assert_eq!(options.entry, Path::new("src/background.ts"));
}

#[test]
fn extra_overrides_win_over_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("eloader.json"), r#"{"entry": "a.ts"}"#).unwrap();

    let options = ConfigDiscovery::new(dir.path())
        .with_env(false)
        .load_with(&json!({"entry": "b.ts"}))
        .unwrap();
    assert_eq!(options.entry, Path::new("b.ts"));
}

#[test]
#[serial]
fn environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("eloader.json"), r#"{"target": "node16"}"#).unwrap();

    env::set_var("ELOADER_TARGET", "node20");
    let result = ConfigDiscovery::new(dir.path()).load();
    env::remove_var("ELOADER_TARGET");

    assert_eq!(result.unwrap().target, "node20");
}

#[test]
fn invalid_types_are_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("eloader.json"), r#"{"bundle": "yes please"}"#).unwrap();

    let err = ConfigDiscovery::new(dir.path())
        .with_env(false)
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}
