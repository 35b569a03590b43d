//! End-to-end tests of the `eloader` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/background.ts"), "export {}\n").unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "demo", "version": "1.0.0", "main": "index.js"}"#,
    )
    .unwrap();
    dir
}

fn eloader(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("eloader").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("NODE_ENV")
        .arg("--no-color")
        .current_dir(cwd);
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    eloader(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dev"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn check_prints_merged_options() {
    let dir = project();
    fs::write(dir.path().join("eloader.json"), r#"{"target": "node18"}"#).unwrap();

    eloader(dir.path())
        .args(["check", "--cwd"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""entry": "src/background.ts""#))
        .stdout(predicate::str::contains(r#""target": "node18""#))
        .stdout(predicate::str::contains(r#""appId": "com.example.app""#))
        .stderr(predicate::str::contains("eloader.json"));
}

#[test]
fn check_fails_on_missing_entry() {
    let dir = project();

    eloader(dir.path())
        .args(["check", "--entry", "src/missing.ts", "--cwd"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn check_rejects_unknown_option() {
    let dir = project();
    fs::write(dir.path().join("eloader.json"), r#"{"entyr": "src/main.ts"}"#).unwrap();

    eloader(dir.path())
        .args(["check", "--cwd"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn build_outside_production_does_nothing() {
    let dir = project();

    eloader(dir.path())
        .args(["build", "--mode", "development", "--cwd"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping packaging"));

    assert!(!dir.path().join("dist").exists());
}

#[test]
fn build_reports_compiler_failure() {
    let dir = project();
    fs::write(
        dir.path().join("eloader.json"),
        r#"{"tools": {"compiler": "eloader-test-missing-esbuild"}}"#,
    )
    .unwrap();

    eloader(dir.path())
        .args(["build", "--mode", "production", "--cwd"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to compile"));

    assert!(!dir.path().join("dist/package.json").exists());
}

#[test]
fn cwd_must_exist() {
    let dir = TempDir::new().unwrap();

    eloader(dir.path())
        .args(["check", "--cwd", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--cwd is not a directory"));
}
