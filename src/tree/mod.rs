//! Filesystem tree traversal
//!
//! Classifies entries, resolves links to canonical identities, and walks
//! directory trees while detecting loops created by symbolic links.

pub mod classifier;
pub mod fs;
pub mod path;
pub mod report;
pub mod walker;

pub use classifier::{Classifier, DirectoryEntry, Resolution};
pub use fs::{EntryKind, FileSystem, MemoryFileSystem, OsFileSystem};
pub use report::{CycleReport, EntryFailure, VisitRecord, WalkEvent, WalkReport, WalkStats};
pub use walker::{CycleWalker, Walk, WalkerConfig};
