//! Integration tests for startup behavior of the gwadmin binary.
//!
//! The menu itself needs a terminal, so these cover everything that happens
//! before it: argument parsing, settings warnings and the variables file
//! policies.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Run gwadmin with a throwaway home and working directory.
fn run_gwadmin(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gwadmin"))
        .current_dir(dir)
        .env("HOME", dir)
        .env_remove("GWADMIN_VARIABLES_FILE")
        .args(args)
        .output()
        .expect("Failed to execute gwadmin")
}

#[test]
fn test_help_lists_options() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_gwadmin(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--variables"), "stdout: {}", stdout);
    assert!(stdout.contains("--strict"), "stdout: {}", stdout);
}

#[test]
fn test_version() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_gwadmin(temp_dir.path(), &["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "stdout: {}", stdout);
}

#[test]
fn test_strict_missing_variables_file_exits_non_zero() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_gwadmin(temp_dir.path(), &["--strict"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Variables file not found"),
        "Expected missing-file error in stderr, got: {}",
        stderr
    );
}

#[test]
fn test_strict_unparseable_variables_file_exits_non_zero() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("state.json");
    fs::write(&path, "{ not json").expect("Failed to write variables file");

    let output = run_gwadmin(
        temp_dir.path(),
        &["--strict", "--variables", path.to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to parse variables file"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_missing_variables_file_starts_empty() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_gwadmin(temp_dir.path(), &[]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Starting with no variables"),
        "Expected start-empty warning in stderr, got: {}",
        stderr
    );
    // Without a terminal the menu refuses to start.
    assert!(stderr.contains("needs a terminal"), "stderr: {}", stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("variables.json").exists());
}

#[test]
fn test_no_host_detection_without_terminal() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("variables.json"), "{}\n")
        .expect("Failed to write variables file");

    let output = run_gwadmin(temp_dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("needs a terminal"), "stderr: {}", stderr);
    // Host facts are only detected for a session that will actually run.
    assert!(
        !stderr.contains("core.system."),
        "Unexpected host fact detection in stderr: {}",
        stderr
    );
    assert!(!stderr.contains("core.session.started"), "stderr: {}", stderr);
}

#[test]
fn test_settings_warning_on_invalid_toml() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let settings_dir = temp_dir.path().join(".gwadmin");
    fs::create_dir_all(&settings_dir).expect("Failed to create .gwadmin dir");
    fs::write(settings_dir.join("config.toml"), "invalid toml [[[")
        .expect("Failed to write invalid settings");

    let output = run_gwadmin(temp_dir.path(), &[]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Warning: Could not load settings"),
        "Expected warning in stderr, got: {}",
        stderr
    );
    assert!(
        stderr.contains("Tip: Check"),
        "Expected tip about settings files in stderr, got: {}",
        stderr
    );
}

#[test]
fn test_no_warning_on_valid_settings() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let settings_dir = temp_dir.path().join(".gwadmin");
    fs::create_dir_all(&settings_dir).expect("Failed to create .gwadmin dir");
    fs::write(
        settings_dir.join("config.toml"),
        r#"
variables_file = "state/vars.json"

[refresh]
update_interval_secs = 600
"#,
    )
    .expect("Failed to write valid settings");

    let output = run_gwadmin(temp_dir.path(), &["--strict"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("Warning: Could not load settings"),
        "Unexpected settings warning in stderr: {}",
        stderr
    );
    // The configured path is the one that was looked for.
    assert!(stderr.contains("state/vars.json"), "stderr: {}", stderr);
}

#[test]
fn test_env_variables_file_is_used() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let env_path = temp_dir.path().join("from-env.json");

    let output = Command::new(env!("CARGO_BIN_EXE_gwadmin"))
        .current_dir(temp_dir.path())
        .env("HOME", temp_dir.path())
        .env("GWADMIN_VARIABLES_FILE", &env_path)
        .arg("--strict")
        .output()
        .expect("Failed to execute gwadmin");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("from-env.json"), "stderr: {}", stderr);
}
