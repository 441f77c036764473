//! Cycle-detecting filesystem walker
//!
//! Depth-first traversal from a root that follows symlinks into
//! directories and keys every directory by its canonical identity. An edge
//! (plain directory or followed link) whose identity was already entered
//! anywhere in the walk is reported as a cycle and not descended.
//!
//! The walk is a lazy iterator with an explicit stack: dropping it stops
//! enumeration, and every call to [`CycleWalker::iter`] starts from a fresh
//! visited set.

use crate::error::{EntryError, WalkError};
use crate::tree::classifier::{Classifier, Resolution};
use crate::tree::fs::{EntryKind, FileSystem, OsFileSystem};
use crate::tree::path::{display_path, DEFAULT_MAX_LINK_HOPS};
use crate::tree::report::{
    CycleReport, EntryFailure, VisitRecord, WalkEvent, WalkReport, WalkStats,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Walker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Follow symbolic links into their targets (default: true)
    #[serde(default = "default_follow_symlinks")]
    pub follow_symlinks: bool,
    /// Link hops allowed when resolving a single path
    #[serde(default = "default_max_link_hops")]
    pub max_link_hops: usize,
    /// Deepest directory level whose entries are listed (None = unlimited, root = 0)
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Entry names to skip (e.g. ".git", "node_modules")
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

fn default_follow_symlinks() -> bool {
    true
}

fn default_max_link_hops() -> usize {
    DEFAULT_MAX_LINK_HOPS
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: default_follow_symlinks(),
            max_link_hops: default_max_link_hops(),
            max_depth: None,
            ignore_patterns: Vec::new(),
        }
    }
}

impl WalkerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_link_hops == 0 {
            return Err("max_link_hops must be at least 1".to_string());
        }
        if self.ignore_patterns.iter().any(|p| p.trim().is_empty()) {
            return Err("ignore_patterns cannot contain empty entries".to_string());
        }
        Ok(())
    }

    fn should_ignore(&self, path: &Path) -> bool {
        match path.file_name() {
            Some(name) => self
                .ignore_patterns
                .iter()
                .any(|pattern| name.to_string_lossy() == pattern.as_str()),
            None => false,
        }
    }

    fn may_enumerate(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth <= max)
    }
}

/// Filesystem walker
pub struct CycleWalker<F: FileSystem = OsFileSystem> {
    fs: F,
    config: WalkerConfig,
}

impl CycleWalker<OsFileSystem> {
    /// Walker over the real filesystem with default configuration
    pub fn new() -> Self {
        Self::with_config(WalkerConfig::default())
    }

    pub fn with_config(config: WalkerConfig) -> Self {
        Self::with_filesystem(OsFileSystem, config)
    }
}

impl Default for CycleWalker<OsFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> CycleWalker<F> {
    pub fn with_filesystem(fs: F, config: WalkerConfig) -> Self {
        Self { fs, config }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    pub fn classifier(&self) -> Classifier<'_, F> {
        Classifier::new(&self.fs, self.config.max_link_hops)
    }

    /// Start a lazy walk from `root`.
    ///
    /// Fails only when the root itself cannot be resolved or is not a
    /// directory. The first event is always the root's visit.
    pub fn iter(&self, root: &Path) -> Result<Walk<'_, F>, WalkError> {
        let classifier = self.classifier();
        let identity = classifier.canonicalize(root)?;
        let kind = self
            .fs
            .kind(&identity)
            .map_err(|e| WalkError::Root(EntryError::from_io(&identity, &e)))?;
        if kind != EntryKind::Directory {
            return Err(WalkError::NotADirectory(root.to_path_buf()));
        }

        // a root that cannot be listed aborts the walk
        let children = if self.config.may_enumerate(0) {
            let listing = self
                .fs
                .read_dir(&identity)
                .map_err(|e| WalkError::Root(EntryError::from_io(&identity, &e)))?;
            Some(listing)
        } else {
            None
        };

        info!(root = %display_path(&identity), "Starting walk");

        let mut walk = Walk {
            classifier,
            fs: &self.fs,
            config: &self.config,
            root: identity.clone(),
            visited: HashSet::new(),
            stack: Vec::new(),
            queued: VecDeque::new(),
            stats: WalkStats::default(),
        };
        walk.mark_entered(root.to_path_buf(), identity, 0);
        if let Some(children) = children {
            walk.push_children(children, 0);
        }
        Ok(walk)
    }

    /// Walk `root` to completion and collect everything it produced.
    pub fn walk(&self, root: &Path) -> Result<WalkReport, WalkError> {
        let mut walk = self.iter(root)?;
        let mut report = WalkReport::new(walk.root().to_path_buf());
        for event in walk.by_ref() {
            report.record(event);
        }
        report.stats = walk.stats().clone();

        info!(
            root = %display_path(&report.root),
            directories = report.stats.directories,
            files = report.stats.files,
            links_followed = report.stats.links_followed,
            cycles = report.stats.cycles,
            failures = report.stats.failures,
            "Walk complete"
        );
        Ok(report)
    }
}

/// Pending children of one entered directory
struct Frame {
    children: std::vec::IntoIter<PathBuf>,
    depth: usize,
}

/// Lazy walk over one root
pub struct Walk<'a, F: FileSystem + ?Sized> {
    classifier: Classifier<'a, F>,
    fs: &'a F,
    config: &'a WalkerConfig,
    root: PathBuf,
    /// Every identity entered so far; never shrinks
    visited: HashSet<PathBuf>,
    stack: Vec<Frame>,
    queued: VecDeque<WalkEvent>,
    stats: WalkStats,
}

impl<'a, F: FileSystem + ?Sized> Walk<'a, F> {
    /// Canonical identity of the walk root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Counters for everything emitted so far
    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }

    pub fn is_visited(&self, identity: &Path) -> bool {
        self.visited.contains(identity)
    }

    fn enter(&mut self, path: PathBuf, identity: PathBuf, depth: usize) {
        self.mark_entered(path, identity.clone(), depth);
        if !self.config.may_enumerate(depth) {
            return;
        }
        // real path, not the link path, so children resolve against the real location
        match self.fs.read_dir(&identity) {
            Ok(children) => self.push_children(children, depth),
            Err(e) => {
                let error = EntryError::from_io(&identity, &e);
                self.fail(&identity, error);
            }
        }
    }

    fn mark_entered(&mut self, path: PathBuf, identity: PathBuf, depth: usize) {
        self.visited.insert(identity.clone());
        self.stats.directories += 1;
        debug!(path = %display_path(&path), identity = %display_path(&identity), depth, "Entering directory");

        self.queued.push_back(WalkEvent::Visited(VisitRecord {
            path,
            identity: Some(identity),
            is_directory: true,
            depth,
        }));
    }

    fn push_children(&mut self, children: Vec<PathBuf>, depth: usize) {
        let children: Vec<PathBuf> = children
            .into_iter()
            .filter(|child| !self.config.should_ignore(child))
            .collect();
        self.stack.push(Frame {
            children: children.into_iter(),
            depth,
        });
    }

    fn visit_child(&mut self, path: PathBuf, depth: usize) {
        let entry = match self.classifier.classify(&path) {
            Ok(entry) => entry,
            Err(error) => return self.fail(&path, error),
        };

        if entry.kind == EntryKind::Symlink && !self.config.follow_symlinks {
            self.record_leaf(path, depth);
            return;
        }

        let resolution = match self.classifier.resolve(&entry) {
            Ok(resolution) => resolution,
            Err(error) => return self.fail(&path, error),
        };

        match resolution {
            Resolution::File => self.record_leaf(path, depth),
            Resolution::Directory { identity } => self.descend(path, identity, depth, false),
            Resolution::SymlinkToDirectory { identity, .. } => {
                self.descend(path, identity, depth, true)
            }
            Resolution::SymlinkToFile { identity, .. } => {
                debug!(path = %display_path(&path), target = %display_path(&identity), "Skipping link to file");
            }
            Resolution::SymlinkBroken { error, .. } => self.fail(&path, error),
        }
    }

    fn descend(&mut self, path: PathBuf, identity: PathBuf, depth: usize, via_link: bool) {
        if self.visited.contains(&identity) {
            self.stats.cycles += 1;
            info!(
                path = %display_path(&path),
                identity = %display_path(&identity),
                via_link,
                "Cycle detected"
            );
            self.queued.push_back(WalkEvent::Cycle(CycleReport {
                path,
                identity,
                depth,
                via_link,
            }));
            return;
        }
        if via_link {
            self.stats.links_followed += 1;
        }
        self.enter(path, identity, depth);
    }

    fn record_leaf(&mut self, path: PathBuf, depth: usize) {
        self.stats.files += 1;
        self.queued.push_back(WalkEvent::Visited(VisitRecord {
            path,
            identity: None,
            is_directory: false,
            depth,
        }));
    }

    fn fail(&mut self, path: &Path, error: EntryError) {
        self.stats.failures += 1;
        warn!(path = %display_path(path), error = %error, "Skipping entry");
        self.queued
            .push_back(WalkEvent::Failed(EntryFailure::new(path, error)));
    }
}

impl<'a, F: FileSystem + ?Sized> Iterator for Walk<'a, F> {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<WalkEvent> {
        loop {
            if let Some(event) = self.queued.pop_front() {
                return Some(event);
            }
            let frame = self.stack.last_mut()?;
            let depth = frame.depth + 1;
            match frame.children.next() {
                Some(child) => self.visit_child(child, depth),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
