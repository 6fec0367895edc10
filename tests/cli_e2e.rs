//! End-to-end CLI tests for the tunefetch binary.
//!
//! Every test points `XDG_CONFIG_HOME` at an empty temp dir so a user config
//! file cannot change the outcome. No test reaches the network.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tunefetch(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tunefetch").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

/// Test that invoking with no input prints guidance and exits with code 0.
#[test]
fn test_binary_without_input_prints_guidance() {
    let config_home = TempDir::new().unwrap();
    tunefetch(&config_home)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("No input provided"));
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let config_home = TempDir::new().unwrap();
    tunefetch(&config_home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Download audio"))
        .stdout(predicate::str::contains("--output-dir"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let config_home = TempDir::new().unwrap();
    tunefetch(&config_home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tunefetch"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let config_home = TempDir::new().unwrap();
    tunefetch(&config_home)
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Test that an unknown audio mode is rejected by argument parsing.
#[test]
fn test_binary_invalid_mode_returns_error() {
    let config_home = TempDir::new().unwrap();
    tunefetch(&config_home)
        .args(["--mode", "video", "Song"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid audio mode"));
}

/// Test that a queue without a destination is refused before any download.
#[test]
fn test_binary_without_destination_fails() {
    let config_home = TempDir::new().unwrap();
    tunefetch(&config_home)
        .arg("Artist - Song")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no destination folder"));
}

/// Test that a bad config file is reported.
#[test]
fn test_binary_rejects_unknown_config_key() {
    let config_home = TempDir::new().unwrap();
    let dir = config_home.path().join("tunefetch");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "concurrency = 4\n").unwrap();

    tunefetch(&config_home)
        .arg("Song")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

/// Test that a CSV together with typed input is refused.
#[test]
fn test_binary_csv_with_typed_input_is_rejected() {
    let config_home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let csv = work.path().join("playlist.csv");
    std::fs::write(&csv, "Artist Name(s),Track Name\nQueen,Bohemian Rhapsody\n").unwrap();

    tunefetch(&config_home)
        .arg("--csv")
        .arg(&csv)
        .arg("-o")
        .arg(work.path())
        .arg("typed line")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot import CSV"));
}

/// Test that a missing download tool fails each item but the run still finishes.
#[test]
fn test_binary_missing_tool_reports_failure_summary() {
    let config_home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    tunefetch(&config_home)
        .args(["-q", "--ytdlp-path", "/nonexistent/tunefetch-yt-dlp", "-o"])
        .arg(out.path())
        .arg("https://youtu.be/dQw4w9WgXcQ")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("failed 1 / total 1"));
}
