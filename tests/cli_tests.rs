//! Integration tests for the tofufy CLI
//!
//! These run the built binary against settings files in temporary
//! directories. Every case fails during configuration, so none of them
//! reach the Route53 API.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the tofufy binary
fn tofufy_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test executable name
    path.pop(); // Remove deps directory

    path.push("tofufy");

    if cfg!(windows) {
        path.set_extension("exe");
    }

    path
}

/// Run tofufy in `dir` and return output
fn run_tofufy(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(tofufy_binary())
        .args(args)
        .current_dir(dir)
        .env_remove("TOFUFY_CONFIG")
        .output()
        .expect("Failed to execute tofufy")
}

fn write_config(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_tofufy_version() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tofufy(dir.path(), &["--version"]);

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tofufy"));
}

#[test]
fn test_tofufy_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tofufy(dir.path(), &["--help"]);

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--only-hostnames"));
    assert!(stdout.contains("--export-target"));
}

#[test]
fn test_missing_config_file_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tofufy(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Config file not found"));
    assert!(stderr.contains("config-route53.json"));
}

#[test]
fn test_single_zone_with_two_zones_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        "config-route53.json",
        r#"{ "zone_ids": ["Z1", "Z2"], "single_zone": true }"#,
    );

    let output = run_tofufy(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("single_zone requires exactly one hosted zone ID, got 2"));

    // Nothing is written when configuration fails
    assert!(!dir.path().join("imports.tf").exists());
    assert!(!dir.path().join("locals.tf").exists());
}

#[test]
fn test_invalid_regex_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        "config-route53.json",
        r#"{ "zone_ids": ["Z1"], "skip_hostnames": ["(unclosed"] }"#,
    );

    let output = run_tofufy(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid hostname pattern"));
}

#[test]
fn test_invalid_cli_regex_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "config-route53.json", r#"{ "zone_ids": ["Z1"] }"#);

    let output = run_tofufy(dir.path(), &["--only-hostnames", "^api\\.,[z-a]"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_export_target_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tofufy(dir.path(), &["--export-target", "everything"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("everything"));
}

#[test]
fn test_missing_zone_ids_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "settings.yaml", "output_dir: generated\n");

    let output = run_tofufy(dir.path(), &["--config", "settings.yaml"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No zone IDs supplied"));
}

#[test]
fn test_config_path_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "custom.json", "{ not json");

    let output = Command::new(tofufy_binary())
        .current_dir(dir.path())
        .env("TOFUFY_CONFIG", "custom.json")
        .output()
        .expect("Failed to execute tofufy");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid JSON in config file custom.json"));
}
