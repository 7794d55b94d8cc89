//! End-to-end tests for `kbview config` commands.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the kbview binary
fn kbview_bin() -> &'static str {
    env!("CARGO_BIN_EXE_kbview")
}

/// Runs kbview with an isolated config directory.
/// Pass the same directory to share state between commands in one test.
fn run_isolated(args: &[&str], config_dir: &Path) -> Output {
    Command::new(kbview_bin())
        .env("KBVIEW_CONFIG_DIR", config_dir)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn show_json(config_dir: &Path) -> serde_json::Value {
    let output = run_isolated(&["config", "show", "--json"], config_dir);
    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_str(&String::from_utf8_lossy(&output.stdout))
        .expect("Should parse JSON output")
}

// ============================================================================
// Show / Path Command Tests
// ============================================================================

#[test]
fn test_config_show_defaults() {
    let config_dir = TempDir::new().unwrap();
    let output = run_isolated(&["config", "show"], config_dir.path());

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("kbview Configuration"));
    assert!(stdout.contains("not configured, using current directory"));
    assert!(stdout.contains("elora (elora): elora.vil"));
    assert!(stdout.contains("corne (corne): corne-v4.vil"));
    assert!(stdout.contains("Theme Mode: auto"));
}

#[test]
fn test_config_show_json_schema() {
    let config_dir = TempDir::new().unwrap();
    let result = show_json(config_dir.path());

    assert!(result["paths"].is_object(), "Should have paths object");
    assert!(result["paths"].get("layouts_dir").is_none());
    assert!(result["ui"]["theme"].is_string(), "Theme should be a string");

    let keyboards = result["keyboards"].as_array().unwrap();
    assert_eq!(keyboards.len(), 2);
    assert_eq!(keyboards[0]["name"], "elora");
    assert_eq!(keyboards[0]["geometry"], "elora");
    assert_eq!(keyboards[0]["layer_names"].as_array().unwrap().len(), 8);
    assert_eq!(keyboards[1]["name"], "corne");
    assert_eq!(keyboards[1]["layer_names"][0], "Base");
}

#[test]
fn test_config_path() {
    let config_dir = TempDir::new().unwrap();
    let output = run_isolated(&["config", "path"], config_dir.path());

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = config_dir.path().join("config.toml");
    assert_eq!(stdout.trim(), expected.display().to_string());
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_theme_persists() {
    let config_dir = TempDir::new().unwrap();

    let output = run_isolated(&["config", "set", "--theme", "dark"], config_dir.path());
    assert_eq!(
        output.status.code(),
        Some(0),
        "Set should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration updated successfully."));
    assert!(config_dir.path().join("config.toml").exists());

    let result = show_json(config_dir.path());
    assert_eq!(result["ui"]["theme"], "dark");
}

#[test]
fn test_config_set_layouts_dir_resolves_profiles() {
    let config_dir = TempDir::new().unwrap();
    let layouts_dir = TempDir::new().unwrap();

    let output = run_isolated(
        &[
            "config",
            "set",
            "--layouts-dir",
            layouts_dir.path().to_str().unwrap(),
        ],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(0));

    let result = show_json(config_dir.path());
    assert_eq!(
        result["paths"]["layouts_dir"],
        layouts_dir.path().to_string_lossy().to_string()
    );
    let expected = layouts_dir.path().join("corne-v4.vil");
    assert_eq!(
        result["keyboards"][1]["layout_file"],
        expected.to_string_lossy().to_string()
    );
}

#[test]
fn test_config_set_default_keyboard() {
    let config_dir = TempDir::new().unwrap();

    let output = run_isolated(
        &["config", "set", "--default-keyboard", "CORNE"],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(0));

    // Stored with the profile's own spelling
    let result = show_json(config_dir.path());
    assert_eq!(result["ui"]["default_keyboard"], "corne");
}

#[test]
fn test_config_set_requires_option() {
    let config_dir = TempDir::new().unwrap();
    let output = run_isolated(&["config", "set"], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("At least one configuration option must be specified"));
    assert!(!config_dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_invalid_theme() {
    let config_dir = TempDir::new().unwrap();
    let output = run_isolated(&["config", "set", "--theme", "sepia"], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid theme mode"));
}

#[test]
fn test_config_set_missing_layouts_dir() {
    let config_dir = TempDir::new().unwrap();
    let output = run_isolated(
        &["config", "set", "--layouts-dir", "/nonexistent/layouts"],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Layouts directory does not exist"));
}

#[test]
fn test_config_set_unknown_default_keyboard() {
    let config_dir = TempDir::new().unwrap();
    let output = run_isolated(
        &["config", "set", "--default-keyboard", "planck"],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown keyboard profile: planck"));
}

const STALE_CONFIG: &str = r#"[paths]
layouts_dir = "/nonexistent/dir"

[[keyboards]]
name = "mycorne"
geometry = "corne"
layout_file = "mine.vil"
layer_names = ["Base", "Nav"]
"#;

#[test]
fn test_config_set_keeps_file_when_invalid() {
    let config_dir = TempDir::new().unwrap();
    let config_file = config_dir.path().join("config.toml");
    fs::write(&config_file, STALE_CONFIG).unwrap();

    let output = run_isolated(&["config", "set", "--theme", "dark"], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Layouts directory does not exist"));
    assert_eq!(fs::read_to_string(&config_file).unwrap(), STALE_CONFIG);
}

#[test]
fn test_config_set_repairs_stale_layouts_dir() {
    let config_dir = TempDir::new().unwrap();
    let layouts_dir = TempDir::new().unwrap();
    fs::write(config_dir.path().join("config.toml"), STALE_CONFIG).unwrap();

    let output = run_isolated(
        &[
            "config",
            "set",
            "--layouts-dir",
            layouts_dir.path().to_str().unwrap(),
        ],
        config_dir.path(),
    );
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // Custom profiles survive the edit
    let result = show_json(config_dir.path());
    let keyboards = result["keyboards"].as_array().unwrap();
    assert_eq!(keyboards.len(), 1);
    assert_eq!(keyboards[0]["name"], "mycorne");
}

#[test]
fn test_config_show_corrupt_file() {
    let config_dir = TempDir::new().unwrap();
    fs::write(config_dir.path().join("config.toml"), "[ui\ntheme_mode = ").unwrap();

    let output = run_isolated(&["config", "show"], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load configuration"));
}
