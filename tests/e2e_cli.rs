//! CLI end-to-end tests
//!
//! Tests for the reelshelf command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the reelshelf binary
#[allow(deprecated)]
fn reelshelf_cmd() -> Command {
    Command::cargo_bin("reelshelf").unwrap()
}

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = reelshelf_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = reelshelf_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reelshelf"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = reelshelf_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reelshelf"));
}

#[test]
fn test_cli_start_help() {
    let mut cmd = reelshelf_cmd();
    cmd.args(["start", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Start the HTTP server"));
}

#[test]
fn test_cli_scan_json() {
    let temp = tempdir().unwrap();
    touch(temp.path(), "movies/Inception.mp4");
    touch(temp.path(), "movies/Inception.vtt");
    touch(temp.path(), "tv/Show/S1/ep1.mp4");

    let output = reelshelf_cmd()
        .args(["scan", "--json", "--media-root"])
        .arg(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kind"], "catalog");
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
}

#[test]
fn test_cli_scan_plain() {
    let temp = tempdir().unwrap();
    touch(temp.path(), "movies/Inception.mp4");

    let mut cmd = reelshelf_cmd();
    cmd.arg("scan")
        .arg("--media-root")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 items"))
        .stdout(predicate::str::contains("movies/Inception.mp4"));
}

#[test]
fn test_cli_scan_missing_root_fails() {
    let temp = tempdir().unwrap();

    let mut cmd = reelshelf_cmd();
    cmd.arg("scan")
        .arg("--media-root")
        .arg(temp.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to scan"));
}

#[test]
fn test_cli_resolve_variant() {
    let temp = tempdir().unwrap();
    touch(temp.path(), "tv/Show/Season1/sub/ep1.mp4");
    touch(temp.path(), "tv/Show/Season1/dub/ep1.mp4");

    let mut cmd = reelshelf_cmd();
    cmd.args(["resolve", "/tv/Show/Season1", "--media-root"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("variant_list"))
        .stdout(predicate::str::contains("SUB"))
        .stdout(predicate::str::contains("DUB"));
}

#[test]
fn test_cli_resolve_traversal_fails() {
    let temp = tempdir().unwrap();
    touch(temp.path(), "tv/Show/ep1.mp4");

    let mut cmd = reelshelf_cmd();
    cmd.args(["resolve", "/tv/..", "--media-root"])
        .arg(temp.path())
        .assert()
        .failure();
}

#[test]
fn test_cli_validate_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("reelshelf.toml");

    fs::write(
        &config_file,
        r#"
[server]
host = "127.0.0.1"
port = 8080

[library]
root = "/srv/media"
variants = ["sub", "dub", "raw"]
"#,
    )
    .unwrap();

    let mut cmd = reelshelf_cmd();
    cmd.args(["validate", config_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("sub, dub, raw"));
}

#[test]
fn test_cli_validate_invalid_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("reelshelf.toml");
    fs::write(&config_file, "[library]\nsubtitle_extension = \"mp4\"\n").unwrap();

    let mut cmd = reelshelf_cmd();
    cmd.args(["validate", config_file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("also listed as a video extension"));
}
