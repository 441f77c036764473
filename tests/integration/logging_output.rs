//! Integration tests for where logs go.
//!
//! Logs default to stderr at warn so report output on stdout stays
//! machine-readable; file output is opt-in.

use super::test_utils::TreeFixture;
use serde_json::Value;
use std::fs;

#[cfg(unix)]
#[test]
fn test_default_logging_keeps_stdout_clean() {
    let tree = TreeFixture::new();
    tree.symlink("dangling", tree.path("nowhere"));

    let output = tree
        .logging_command()
        .args(["scan", "--format", "json"])
        .arg(&tree.root)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["failures"].as_array().unwrap().len(), 1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Skipping entry"), "stderr={}", stderr);
}

#[cfg(unix)]
#[test]
fn test_file_logging_records_cycles() {
    let tree = TreeFixture::new();
    tree.dir("sub").symlink("sub/up", "..");
    let log_file = tree.temp_dir.path().join("logs").join("walk.log");

    let output = tree
        .logging_command()
        .args(["--log-level", "info", "--log-output", "file", "--log-file"])
        .arg(&log_file)
        .arg("check")
        .arg(&tree.root)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let log = fs::read_to_string(&log_file).unwrap();
    assert!(log.contains("Cycle detected"), "log={}", log);
    assert!(log.contains("Walk complete"));
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let tree = TreeFixture::new();

    let output = tree
        .logging_command()
        .args(["--log-level", "loud", "check"])
        .arg(&tree.root)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid log level"));
}
