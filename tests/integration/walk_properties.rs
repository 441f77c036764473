//! Integration tests for walk behavior on a real filesystem

use super::test_utils::TreeFixture;
use cyclewalk::error::{ErrorKind, WalkError};
use cyclewalk::tree::{CycleWalker, WalkEvent};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// A tree without links visits every real directory and reports nothing
#[test]
fn test_no_links_visits_every_directory() {
    let tree = TreeFixture::new();
    tree.dir("a/b/c").dir("d").file("a/file.txt").file("d/other.txt");

    let report = CycleWalker::new().walk(&tree.root).unwrap();

    let expected: BTreeSet<PathBuf> = ["", "a", "a/b", "a/b/c", "d"]
        .iter()
        .map(|p| tree.canonical(p))
        .collect();
    assert_eq!(report.directory_identities(), expected);
    assert!(report.cycles.is_empty());
    assert!(report.failures.is_empty());
    assert_eq!(report.stats.files, 2);
}

/// Walking a file or a missing path fails before any event is produced
#[test]
fn test_root_errors_are_fatal() {
    let tree = TreeFixture::new();
    tree.file("plain.txt");

    let err = CycleWalker::new().walk(&tree.path("plain.txt")).unwrap_err();
    assert!(matches!(err, WalkError::NotADirectory(_)));

    let err = CycleWalker::new().walk(&tree.path("absent")).unwrap_err();
    assert!(matches!(err, WalkError::Root(_)));
}

/// Two walks over an unmodified tree agree exactly
#[cfg(unix)]
#[test]
fn test_rerun_is_identical() {
    let tree = TreeFixture::new();
    tree.dir("a/b")
        .dir("c")
        .symlink("a/b/up", "../..")
        .symlink("c/alias", tree.path("a"));

    let walker = CycleWalker::new();
    let first = walker.walk(&tree.root).unwrap();
    let second = walker.walk(&tree.root).unwrap();

    assert_eq!(first, second);
}

#[cfg(unix)]
#[test]
fn test_link_to_root_reports_one_cycle() {
    let tree = TreeFixture::new();
    tree.dir("sub").symlink("sub/link", &tree.root);

    let report = CycleWalker::new().walk(&tree.root).unwrap();

    assert_eq!(report.cycles.len(), 1);
    assert_eq!(report.cycles[0].path, tree.path("sub/link"));
    assert_eq!(report.cycles[0].identity, tree.canonical(""));
    // root entered once, sub entered once
    assert_eq!(report.stats.directories, 2);
}

#[cfg(unix)]
#[test]
fn test_alias_link_visits_content_once() {
    let tree = TreeFixture::new();
    tree.file("a/inside.txt").symlink("linkToA", tree.path("a"));

    let report = CycleWalker::new().walk(&tree.root).unwrap();

    let expected: BTreeSet<PathBuf> = [tree.canonical("a")].into_iter().collect();
    assert_eq!(report.cycle_identities(), expected);
    assert_eq!(report.stats.files, 1);
    // sorted enumeration meets the real directory first
    assert_eq!(report.cycles[0].path, tree.path("linkToA"));
    assert!(report.cycles[0].via_link);
}

#[cfg(unix)]
#[test]
fn test_link_pair_and_self_link_terminate() {
    let tree = TreeFixture::new();
    tree.symlink("ping", tree.path("pong"))
        .symlink("pong", tree.path("ping"))
        .symlink("me", "me");

    let report = CycleWalker::new().walk(&tree.root).unwrap();

    assert!(report.cycles.is_empty());
    assert_eq!(report.failures.len(), 3);
    assert!(report
        .failures
        .iter()
        .all(|f| f.kind == ErrorKind::ResolutionCycle));
}

#[cfg(unix)]
#[test]
fn test_broken_link_keeps_other_cycles() {
    let tree = TreeFixture::new();
    tree.dir("deep/er")
        .symlink("dangling", tree.path("nowhere"))
        .symlink("deep/er/loop", "../..");

    let report = CycleWalker::new().walk(&tree.root).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, ErrorKind::BrokenLink);
    assert_eq!(report.failures[0].path, tree.path("dangling"));
    assert_eq!(report.cycles.len(), 1);
    assert_eq!(report.cycles[0].identity, tree.canonical(""));
}

#[cfg(unix)]
#[test]
fn test_link_outside_root_is_followed_once() {
    let tree = TreeFixture::new();
    let outside = tree.temp_dir.path().join("outside");
    std::fs::create_dir_all(outside.join("nested")).unwrap();
    tree.symlink("first", &outside).symlink("second", &outside);

    let report = CycleWalker::new().walk(&tree.root).unwrap();

    let outside_identity = dunce::canonicalize(&outside).unwrap();
    assert!(report.directory_identities().contains(&outside_identity));
    assert!(report
        .directory_identities()
        .contains(&outside_identity.join("nested")));
    assert_eq!(report.stats.links_followed, 1);
    assert_eq!(report.cycles.len(), 1);
    assert_eq!(report.cycles[0].path, tree.path("second"));
}

#[cfg(unix)]
#[test]
fn test_link_to_file_is_skipped() {
    let tree = TreeFixture::new();
    tree.file("real.txt").symlink("alias.txt", tree.path("real.txt"));

    let report = CycleWalker::new().walk(&tree.root).unwrap();

    assert_eq!(report.stats.files, 1);
    assert!(report.cycles.is_empty());
    assert!(report.failures.is_empty());
}

/// The lazy walk yields the same events the eager walk collects
#[cfg(unix)]
#[test]
fn test_lazy_and_eager_agree() {
    let tree = TreeFixture::new();
    tree.dir("x/y").symlink("x/y/back", "..").file("x/f.txt");

    let walker = CycleWalker::new();
    let report = walker.walk(&tree.root).unwrap();
    let events: Vec<WalkEvent> = walker.iter(&tree.root).unwrap().collect();

    let cycles = events
        .iter()
        .filter(|e| matches!(e, WalkEvent::Cycle(_)))
        .count();
    let visits = events
        .iter()
        .filter(|e| matches!(e, WalkEvent::Visited(_)))
        .count();
    assert_eq!(cycles, report.cycles.len());
    assert_eq!(visits, report.visited.len());
}
