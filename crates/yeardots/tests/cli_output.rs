//! Integration tests for CLI output behavior
//!
//! The default behavior is quiet (errors only). Use -v/--verbose to enable logs.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Run yeardots with `home` as the home directory.
fn run_yeardots(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_yeardots"))
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute yeardots")
}

fn print_scene(home: &Path, extra: &[&str]) -> (serde_json::Value, String) {
    let mut args = vec!["--print-scene"];
    args.extend_from_slice(extra);
    let output = run_yeardots(home, &args);
    assert!(
        output.status.success(),
        "yeardots --print-scene failed with exit code {:?}. stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let scene = serde_json::from_str(&stdout).expect("stdout should be a single JSON document");
    (scene, String::from_utf8_lossy(&output.stderr).into_owned())
}

#[test]
fn test_print_scene_is_valid_json() {
    let home = tempfile::tempdir().unwrap();
    let (scene, _) = print_scene(home.path(), &[]);

    let total = scene["progress"]["days_total"].as_u64().unwrap();
    let done = scene["progress"]["days_done"].as_u64().unwrap();
    assert!(total == 365 || total == 366);
    assert!((1..=total).contains(&done));

    let dots = scene["dots"].as_array().unwrap();
    assert_eq!(dots.len() as u64, total);
    let filled = dots.iter().filter(|d| d["done"] == true).count() as u64;
    assert_eq!(filled, done);

    assert_eq!(scene["caption"]["text"], "YEAR PROGRESS");
    assert!(scene["value"]["text"].as_str().unwrap().ends_with('%'));
    assert_eq!(scene["corner_radius"], 20);
}

#[test]
fn test_default_mode_suppresses_info_logs() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr) = print_scene(home.path(), &[]);

    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should suppress INFO logs, but stderr contains: {}",
        stderr
    );
    assert!(
        !stderr.contains(r#""level":"WARN""#),
        "Default mode should suppress WARN logs, but stderr contains: {}",
        stderr
    );
}

#[test]
fn test_verbose_mode_emits_json_logs() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr) = print_scene(home.path(), &["-v"]);

    assert!(
        stderr.contains(r#""event":"core.app.startup_completed""#),
        "Verbose mode should log startup, got: {}",
        stderr
    );
}

#[test]
fn test_config_from_user_dir_applies() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join(".yeardots");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[appearance]\ncorner_radius = 8\ndots_per_row = 20\n",
    )
    .unwrap();

    let (scene, stderr) = print_scene(home.path(), &[]);
    assert_eq!(scene["corner_radius"], 8, "stderr: {}", stderr);
    // Day 21 starts the second row.
    let dots = scene["dots"].as_array().unwrap();
    assert_eq!(dots[20]["bounds"]["x"], dots[0]["bounds"]["x"]);
}

#[test]
fn test_config_warning_on_invalid_toml() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("broken.toml");
    fs::write(&config, "invalid toml [[[").unwrap();

    let (scene, stderr) = print_scene(home.path(), &["--config", config.to_str().unwrap()]);

    assert!(
        stderr.contains("Warning: Could not load config"),
        "Expected warning in stderr, got: {}",
        stderr
    );
    assert!(stderr.contains("Tip: Check"), "got: {}", stderr);
    // Defaults still apply.
    assert_eq!(scene["corner_radius"], 20);
}

#[test]
fn test_missing_explicit_config_warns() {
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("nope.toml");

    let (_, stderr) = print_scene(home.path(), &["--config", missing.to_str().unwrap()]);
    assert!(stderr.contains("Warning: Could not load config"), "got: {}", stderr);
}

#[test]
fn test_no_warning_on_valid_config() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("ok.toml");
    fs::write(&config, "[blur]\neffect = \"blur_behind\"\n").unwrap();

    let (_, stderr) = print_scene(home.path(), &["--config", config.to_str().unwrap()]);
    assert!(
        !stderr.contains("Warning: Could not load config"),
        "Unexpected config warning in stderr: {}",
        stderr
    );
}

#[cfg(unix)]
#[test]
fn test_reset_position_removes_saved_file() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join(".yeardots");
    fs::create_dir_all(&data_dir).unwrap();
    let position = data_dir.join("position.json");
    fs::write(&position, r#"{"x": 400, "y": 300}"#).unwrap();

    print_scene(home.path(), &["--reset-position"]);
    assert!(!position.exists());
}

#[cfg(unix)]
#[test]
fn test_reset_position_alone_succeeds() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join(".yeardots");
    fs::create_dir_all(&data_dir).unwrap();
    let position = data_dir.join("position.json");
    fs::write(&position, r#"{"x": 400, "y": 300}"#).unwrap();

    let output = run_yeardots(home.path(), &["--reset-position"]);
    assert!(
        output.status.success(),
        "reset-only run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!position.exists());
}

#[test]
fn test_version_and_help() {
    let home = tempfile::tempdir().unwrap();

    let version = run_yeardots(home.path(), &["--version"]);
    assert!(version.status.success());
    assert!(String::from_utf8_lossy(&version.stdout).contains(env!("CARGO_PKG_VERSION")));

    let help = run_yeardots(home.path(), &["--help"]);
    assert!(help.status.success());
    let text = String::from_utf8_lossy(&help.stdout);
    assert!(text.contains("--print-scene"));
    assert!(text.contains("--no-embed"));
}

#[cfg(not(windows))]
#[test]
fn test_widget_requires_windows() {
    let home = tempfile::tempdir().unwrap();
    let output = run_yeardots(home.path(), &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--print-scene"), "got: {}", stderr);
}
