//! End-to-end tests for the cyclewalk binary

use super::test_utils::TreeFixture;
use serde_json::Value;

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_check_clean_tree_exits_zero() {
    let tree = TreeFixture::new();
    tree.dir("a/b").file("a/b/f.txt");

    let output = tree.command().arg("check").arg(&tree.root).output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).trim().is_empty());
}

#[test]
fn test_check_missing_root_exits_one() {
    let tree = TreeFixture::new();

    let output = tree
        .command()
        .arg("check")
        .arg(tree.path("missing"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[cfg(unix)]
#[test]
fn test_check_cycle_exits_two() {
    let tree = TreeFixture::new();
    tree.dir("sub").symlink("sub/up", "..");

    let output = tree.command().arg("check").arg(&tree.root).output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    let text = stdout(&output);
    assert!(text.contains("up ->"), "unexpected output: {}", text);
}

#[cfg(unix)]
#[test]
fn test_scan_json_lists_cycles_and_failures() {
    let tree = TreeFixture::new();
    tree.dir("sub")
        .symlink("sub/up", "..")
        .symlink("dangling", tree.path("nowhere"));

    let output = tree
        .command()
        .args(["scan", "--format", "json"])
        .arg(&tree.root)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let json: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let cycles = json["cycles"].as_array().unwrap();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0]["via_link"], Value::Bool(true));
    let failures = json["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["kind"], "broken_link");
    assert_eq!(json["stats"]["cycles"], 1);
}

#[cfg(unix)]
#[test]
fn test_scan_no_follow_reports_no_cycles() {
    let tree = TreeFixture::new();
    tree.dir("sub").symlink("sub/up", "..");

    let output = tree
        .command()
        .args(["scan", "--no-follow"])
        .arg(&tree.root)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("No cycles found."), "unexpected output: {}", text);
}

#[test]
fn test_scan_ignore_skips_named_entries() {
    let tree = TreeFixture::new();
    tree.file("keep/a.txt").file("skip/b.txt");

    let output = tree
        .command()
        .args(["scan", "--format", "json", "--ignore", "skip"])
        .arg(&tree.root)
        .output()
        .unwrap();

    let json: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["stats"]["directories"], 2);
    assert_eq!(json["stats"]["files"], 1);
}

#[cfg(unix)]
#[test]
fn test_resolve_self_link_fails() {
    let tree = TreeFixture::new();
    tree.symlink("me", "me");

    let output = tree
        .command()
        .args(["resolve", "--format", "json"])
        .arg(tree.path("me"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["resolution"], "symlink_broken");
    assert_eq!(json["error_kind"], "resolution_cycle");
}

#[cfg(unix)]
#[test]
fn test_resolve_link_to_directory() {
    let tree = TreeFixture::new();
    tree.dir("target").symlink("alias", tree.path("target"));

    let output = tree.command().arg("resolve").arg(tree.path("alias")).output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("Resolution: symlink_to_directory"));
    assert!(text.contains("Kind: symlink"));
}

#[test]
fn test_workspace_config_feeds_walker_defaults() {
    let tree = TreeFixture::new();
    std::fs::write(
        tree.path(".cyclewalk.toml"),
        "[walker]\nmax_link_hops = 7\nignore_patterns = [\"vendor\"]\n",
    )
    .unwrap();

    let output = tree.command().arg("config").arg(&tree.root).output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("max_link_hops = 7"), "unexpected output: {}", text);
    assert!(text.contains("vendor"));
}

#[test]
fn test_invalid_workspace_config_exits_one() {
    let tree = TreeFixture::new();
    std::fs::write(tree.path(".cyclewalk.toml"), "[walker]\nmax_link_hops = 0\n").unwrap();

    let output = tree.command().arg("check").arg(&tree.root).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
}
