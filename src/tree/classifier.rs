//! Entry classification: what a path is, and where it leads.

use crate::error::EntryError;
use crate::tree::fs::{EntryKind, FileSystem};
use crate::tree::path::canonicalize_path;
use std::path::{Path, PathBuf};

/// One enumerated entry, classified without following a trailing link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Immediate target as stored in the link (symlinks only)
    pub link_target: Option<PathBuf>,
}

/// Where an entry leads once links are resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    File,
    Directory {
        identity: PathBuf,
    },
    SymlinkToDirectory {
        target: PathBuf,
        identity: PathBuf,
    },
    SymlinkToFile {
        target: PathBuf,
        identity: PathBuf,
    },
    /// Dangling link, or a link chain that never settles
    SymlinkBroken {
        target: PathBuf,
        error: EntryError,
    },
}

/// Read-only lookups against a [`FileSystem`]
pub struct Classifier<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    max_hops: usize,
}

impl<'a, F: FileSystem + ?Sized> Classifier<'a, F> {
    pub fn new(fs: &'a F, max_hops: usize) -> Self {
        Self { fs, max_hops }
    }

    /// lstat-style classification of `path`.
    pub fn classify(&self, path: &Path) -> Result<DirectoryEntry, EntryError> {
        let kind = self
            .fs
            .kind(path)
            .map_err(|e| EntryError::from_io(path, &e))?;
        let link_target = match kind {
            EntryKind::Symlink => Some(
                self.fs
                    .read_link(path)
                    .map_err(|e| EntryError::from_io(path, &e))?,
            ),
            _ => None,
        };
        Ok(DirectoryEntry {
            path: path.to_path_buf(),
            kind,
            link_target,
        })
    }

    /// Fully resolved absolute identity of `path`, bounded by the hop limit.
    pub fn canonicalize(&self, path: &Path) -> Result<PathBuf, EntryError> {
        canonicalize_path(self.fs, path, self.max_hops)
    }

    /// Resolve a classified entry into its traversal tag.
    ///
    /// Broken links and runaway link chains come back as
    /// [`Resolution::SymlinkBroken`]; only metadata failures are `Err`.
    pub fn resolve(&self, entry: &DirectoryEntry) -> Result<Resolution, EntryError> {
        match entry.kind {
            EntryKind::File => Ok(Resolution::File),
            EntryKind::Directory => Ok(Resolution::Directory {
                identity: self.canonicalize(&entry.path)?,
            }),
            EntryKind::Symlink => {
                let target = entry.link_target.clone().unwrap_or_default();
                let identity = match self.canonicalize(&entry.path) {
                    Ok(identity) => identity,
                    Err(
                        error @ (EntryError::BrokenLink { .. }
                        | EntryError::ResolutionCycle { .. }
                        | EntryError::NotADirectory(_)),
                    ) => return Ok(Resolution::SymlinkBroken { target, error }),
                    Err(error) => return Err(error),
                };
                // identity holds no links, so this reports the target's own kind
                let target_kind = self
                    .fs
                    .kind(&identity)
                    .map_err(|e| EntryError::from_io(&identity, &e))?;
                Ok(match target_kind {
                    EntryKind::Directory => Resolution::SymlinkToDirectory { target, identity },
                    _ => Resolution::SymlinkToFile { target, identity },
                })
            }
        }
    }
}
