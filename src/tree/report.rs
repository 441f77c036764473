//! Walk output records

use crate::error::{EntryError, ErrorKind};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// An entry the walk reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitRecord {
    /// Path as encountered (the link path for followed links)
    pub path: PathBuf,
    /// Canonical identity; directories only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<PathBuf>,
    pub is_directory: bool,
    pub depth: usize,
}

/// A traversal edge that leads back to an identity already entered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// The entry that triggered the revisit
    pub path: PathBuf,
    /// The already-visited identity it resolves to
    pub identity: PathBuf,
    pub depth: usize,
    /// Reached through a symbolic link rather than a plain directory
    pub via_link: bool,
}

/// A non-fatal failure on a single entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFailure {
    pub path: PathBuf,
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip)]
    pub error: EntryError,
}

impl EntryFailure {
    pub fn new(path: &Path, error: EntryError) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: error.kind(),
            message: error.to_string(),
            error,
        }
    }
}

/// One step of walk progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WalkEvent {
    Visited(VisitRecord),
    Cycle(CycleReport),
    Failed(EntryFailure),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    pub directories: usize,
    pub files: usize,
    pub links_followed: usize,
    pub cycles: usize,
    pub failures: usize,
}

/// Everything one walk produced, in emission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkReport {
    pub root: PathBuf,
    pub visited: Vec<VisitRecord>,
    pub cycles: Vec<CycleReport>,
    pub failures: Vec<EntryFailure>,
    pub stats: WalkStats,
}

impl WalkReport {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            visited: Vec::new(),
            cycles: Vec::new(),
            failures: Vec::new(),
            stats: WalkStats::default(),
        }
    }

    pub fn record(&mut self, event: WalkEvent) {
        match event {
            WalkEvent::Visited(visit) => self.visited.push(visit),
            WalkEvent::Cycle(cycle) => self.cycles.push(cycle),
            WalkEvent::Failed(failure) => self.failures.push(failure),
        }
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Identities of every directory entered.
    pub fn directory_identities(&self) -> BTreeSet<PathBuf> {
        self.visited
            .iter()
            .filter_map(|visit| visit.identity.clone())
            .collect()
    }

    /// Identities reported as revisited.
    pub fn cycle_identities(&self) -> BTreeSet<PathBuf> {
        self.cycles.iter().map(|cycle| cycle.identity.clone()).collect()
    }
}
