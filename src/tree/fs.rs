//! Filesystem access used by the classifier and walker
//!
//! Everything the walker knows about the disk comes through [`FileSystem`]:
//! lstat-style kind lookups, link reads, and directory listings.
//! [`OsFileSystem`] talks to the real disk; [`MemoryFileSystem`] models a
//! tree in memory so graph shapes (self links, link pairs, unreadable
//! directories, custom sibling order) can be built without touching disk.

use serde::Serialize;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Kind of a filesystem entry, as seen without following a trailing link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

/// Directory entry enumerator and metadata capability
pub trait FileSystem {
    /// Kind of `path` without following a trailing symlink.
    fn kind(&self, path: &Path) -> io::Result<EntryKind>;

    /// Immediate target of the symlink at `path`, exactly as stored.
    fn read_link(&self, path: &Path) -> io::Result<PathBuf>;

    /// Full paths of the immediate children of `path`.
    ///
    /// Order must be stable across calls on an unmodified tree.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Base used to absolutize relative paths.
    fn current_dir(&self) -> io::Result<PathBuf>;
}

/// [`FileSystem`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn kind(&self, path: &Path) -> io::Result<EntryKind> {
        let file_type = fs::symlink_metadata(path)?.file_type();
        Ok(if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            // sockets, fifos and devices carry no traversal edges either
            EntryKind::File
        })
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        fs::read_link(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(path)? {
            children.push(entry?.path());
        }
        // read_dir order is platform dependent; sort for determinism
        children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(children)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}

#[derive(Debug, Clone)]
enum MemoryNode {
    File,
    Directory {
        children: Vec<OsString>,
        readable: bool,
    },
    Symlink(PathBuf),
}

/// In-memory [`FileSystem`]
///
/// Paths are absolute and looked up lexically: intermediate components are
/// never resolved through links, which matches how the walker calls in
/// (it only asks about paths whose parent is already canonical). Children
/// are listed in insertion order.
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    nodes: HashMap<PathBuf, MemoryNode>,
    cwd: PathBuf,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFileSystem {
    /// Empty tree containing only `/`.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            PathBuf::from("/"),
            MemoryNode::Directory {
                children: Vec::new(),
                readable: true,
            },
        );
        Self {
            nodes,
            cwd: PathBuf::from("/"),
        }
    }

    /// Add a directory, creating missing parents.
    pub fn dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = absolute(path.as_ref());
        if !matches!(self.nodes.get(&path), Some(MemoryNode::Directory { .. })) {
            self.insert(
                path,
                MemoryNode::Directory {
                    children: Vec::new(),
                    readable: true,
                },
            );
        }
        self
    }

    /// Add a regular file, creating missing parents.
    pub fn file(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.insert(absolute(path.as_ref()), MemoryNode::File);
        self
    }

    /// Add a symlink at `path` whose stored target is `target`.
    pub fn symlink(&mut self, path: impl AsRef<Path>, target: impl AsRef<Path>) -> &mut Self {
        self.insert(
            absolute(path.as_ref()),
            MemoryNode::Symlink(target.as_ref().to_path_buf()),
        );
        self
    }

    /// Make listing the directory at `path` fail with `PermissionDenied`.
    pub fn deny(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = absolute(path.as_ref());
        self.dir(&path);
        if let Some(MemoryNode::Directory { readable, .. }) = self.nodes.get_mut(&path) {
            *readable = false;
        }
        self
    }

    /// Directory relative paths are resolved against.
    pub fn set_current_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.cwd = absolute(path.as_ref());
        self
    }

    fn insert(&mut self, path: PathBuf, node: MemoryNode) {
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            let parent = parent.to_path_buf();
            self.dir(&parent);
            if let Some(MemoryNode::Directory { children, .. }) = self.nodes.get_mut(&parent) {
                if !children.iter().any(|child| child == name) {
                    children.push(name.to_os_string());
                }
            }
        }
        // re-adding a directory keeps its listing
        let keep_existing = matches!(node, MemoryNode::Directory { .. })
            && matches!(self.nodes.get(&path), Some(MemoryNode::Directory { .. }));
        if !keep_existing {
            self.nodes.insert(path, node);
        }
    }

    fn node(&self, path: &Path) -> io::Result<&MemoryNode> {
        self.nodes.get(&absolute(path)).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such entry: {}", path.display()),
            )
        })
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.has_root() {
        path.to_path_buf()
    } else {
        Path::new("/").join(path)
    }
}

impl FileSystem for MemoryFileSystem {
    fn kind(&self, path: &Path) -> io::Result<EntryKind> {
        Ok(match self.node(path)? {
            MemoryNode::File => EntryKind::File,
            MemoryNode::Directory { .. } => EntryKind::Directory,
            MemoryNode::Symlink(_) => EntryKind::Symlink,
        })
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        match self.node(path)? {
            MemoryNode::Symlink(target) => Ok(target.clone()),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a symbolic link: {}", path.display()),
            )),
        }
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        match self.node(path)? {
            MemoryNode::Directory { readable: false, .. } => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot list: {}", path.display()),
            )),
            MemoryNode::Directory { children, .. } => {
                let base = absolute(path);
                Ok(children.iter().map(|name| base.join(name)).collect())
            }
            _ => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("not a directory: {}", path.display()),
            )),
        }
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }
}
