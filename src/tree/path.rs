//! Path canonicalization and display utilities

use crate::error::EntryError;
use crate::tree::fs::{EntryKind, FileSystem};
use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use tracing::trace;

/// Link hops allowed while resolving one path (Linux uses 40 for ELOOP).
pub const DEFAULT_MAX_LINK_HOPS: usize = 40;

#[derive(Debug, Clone)]
enum Step {
    Parent,
    Name(OsString),
}

/// Split a path into its anchor (prefix and root) and the remaining steps.
fn split_anchor(path: &Path) -> (PathBuf, Vec<Step>) {
    let mut anchor = PathBuf::new();
    let mut steps = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => anchor.push(prefix.as_os_str()),
            Component::RootDir => anchor.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => steps.push(Step::Parent),
            Component::Normal(name) => steps.push(Step::Name(name.to_os_string())),
        }
    }
    (anchor, steps)
}

/// Resolve `path` to its canonical identity
///
/// Walks the path one component at a time, splicing in link targets as
/// they are met, and counts every link followed. The result is absolute,
/// contains no `.`/`..` and no symlink components.
///
/// Errors:
/// - `NotFound` when a component is missing and no link has been followed
/// - `BrokenLink` when a component is missing after following a link
/// - `ResolutionCycle` when more than `max_hops` links are followed
/// - `NotADirectory` when a non-final component is a regular file
/// - `PermissionDenied` / `Io` when metadata cannot be read
pub fn canonicalize_path<F>(fs: &F, path: &Path, max_hops: usize) -> Result<PathBuf, EntryError>
where
    F: FileSystem + ?Sized,
{
    let absolute = if path.has_root() {
        path.to_path_buf()
    } else {
        fs.current_dir()
            .map_err(|e| EntryError::from_io(path, &e))?
            .join(path)
    };

    let (mut resolved, steps) = split_anchor(&absolute);
    let mut pending: VecDeque<Step> = steps.into();
    let mut hops = 0usize;
    let mut last_target: Option<PathBuf> = None;

    while let Some(step) = pending.pop_front() {
        let name = match step {
            Step::Parent => {
                // `..` at the root stays at the root
                resolved.pop();
                continue;
            }
            Step::Name(name) => name,
        };

        let candidate = resolved.join(&name);
        let kind = match fs.kind(&candidate) {
            Ok(kind) => kind,
            Err(e) => {
                return Err(match (EntryError::from_io(&candidate, &e), last_target) {
                    (EntryError::NotFound(_), Some(target)) => EntryError::BrokenLink {
                        link: path.to_path_buf(),
                        target,
                    },
                    (err, _) => err,
                });
            }
        };

        match kind {
            EntryKind::Directory => resolved = candidate,
            EntryKind::File => {
                if !pending.is_empty() {
                    return Err(EntryError::NotADirectory(candidate));
                }
                resolved = candidate;
            }
            EntryKind::Symlink => {
                hops += 1;
                if hops > max_hops {
                    return Err(EntryError::ResolutionCycle {
                        path: path.to_path_buf(),
                        hops: max_hops,
                    });
                }
                let target = fs
                    .read_link(&candidate)
                    .map_err(|e| EntryError::from_io(&candidate, &e))?;
                trace!(link = %candidate.display(), target = %target.display(), hops, "Following link");

                let (target_anchor, target_steps) = split_anchor(&target);
                if target.has_root() {
                    resolved = target_anchor;
                }
                // relative targets continue from the link's own directory
                for target_step in target_steps.into_iter().rev() {
                    pending.push_front(target_step);
                }
                last_target = Some(target);
            }
        }
    }

    Ok(dunce::simplified(&resolved).to_path_buf())
}

/// Render a path for reports and logs.
///
/// Strips Windows verbatim prefixes and trailing separators (except root).
pub fn display_path(path: &Path) -> String {
    let mut rendered = dunce::simplified(path).to_string_lossy().to_string();
    while rendered.len() > 1 && (rendered.ends_with('/') || rendered.ends_with('\\')) {
        rendered.pop();
    }
    rendered
}
