//! Error types for the cycle-aware tree walker.

use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Per-entry errors. Reported alongside walk output and never stop traversal
/// of siblings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Broken symbolic link: {link} -> {target}")]
    BrokenLink { link: PathBuf, target: PathBuf },

    #[error("Symbolic link chain does not resolve after {hops} hops: {path}")]
    ResolutionCycle { path: PathBuf, hops: usize },

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("I/O error at {path}: {message}")]
    Io { path: PathBuf, message: String },
}

/// Serializable tag for an [`EntryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    BrokenLink,
    ResolutionCycle,
    NotADirectory,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::BrokenLink => "broken_link",
            ErrorKind::ResolutionCycle => "resolution_cycle",
            ErrorKind::NotADirectory => "not_a_directory",
            ErrorKind::Io => "io",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EntryError {
    /// Map an I/O failure on `path` to an entry error.
    pub fn from_io(path: &Path, err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => EntryError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => EntryError::PermissionDenied(path.to_path_buf()),
            _ => EntryError::Io {
                path: path.to_path_buf(),
                message: err.to_string(),
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EntryError::NotFound(_) => ErrorKind::NotFound,
            EntryError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            EntryError::BrokenLink { .. } => ErrorKind::BrokenLink,
            EntryError::ResolutionCycle { .. } => ErrorKind::ResolutionCycle,
            EntryError::NotADirectory(_) => ErrorKind::NotADirectory,
            EntryError::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Fatal errors: anything wrong with the walk root aborts the walk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("Walk root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Walk root cannot be resolved: {0}")]
    Root(#[from] EntryError),
}

/// Errors surfaced by the outer layers (config, CLI, output)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Walk(#[from] WalkError),

    #[error("{0}")]
    Entry(#[from] EntryError),

    #[error("Output error: {0}")]
    OutputError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
