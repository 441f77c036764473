//! Shared test utilities for integration tests
//!
//! Builds on-disk trees in a temp directory and runs the CLI binary with an
//! isolated config environment so a developer's own config never leaks in.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Temporary directory tree rooted at the real path of `<tmp>/root`
pub struct TreeFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TreeFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        std::fs::create_dir(&root).unwrap();
        // walk output is keyed by real paths, so the fixture is too
        let root = dunce::canonicalize(root).unwrap();
        Self { temp_dir, root }
    }

    /// Absolute path for a path relative to the root.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn dir(&self, relative: &str) -> &Self {
        std::fs::create_dir_all(self.path(relative)).unwrap();
        self
    }

    pub fn file(&self, relative: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "content").unwrap();
        self
    }

    /// Create a symlink at `relative` with the stored target `target`.
    #[cfg(unix)]
    pub fn symlink(&self, relative: &str, target: impl AsRef<Path>) -> &Self {
        std::os::unix::fs::symlink(target, self.path(relative)).unwrap();
        self
    }

    /// Canonical identity as the OS sees it.
    pub fn canonical(&self, relative: &str) -> PathBuf {
        let path = if relative.is_empty() {
            self.root.clone()
        } else {
            self.path(relative)
        };
        dunce::canonicalize(path).unwrap()
    }

    /// The CLI binary with logging disabled.
    pub fn command(&self) -> Command {
        let mut command = self.logging_command();
        command.arg("--quiet");
        command
    }

    /// The CLI binary with config and log locations pointed into the temp dir.
    pub fn logging_command(&self) -> Command {
        let xdg = self.temp_dir.path().join("xdg");
        let mut command = Command::new(env!("CARGO_BIN_EXE_cyclewalk"));
        command
            .env("XDG_CONFIG_HOME", xdg.join("config"))
            .env("XDG_DATA_HOME", xdg.join("data"))
            .env("NO_COLOR", "1")
            .env_remove("CYCLEWALK_LOG")
            .env_remove("CYCLEWALK_LOG_MODULES")
            .env_remove("CYCLEWALK_LOG_FORMAT")
            .env_remove("CYCLEWALK_LOG_OUTPUT")
            .env_remove("CYCLEWALK__WALKER__MAX_LINK_HOPS");
        command
    }
}
