//! Single-path resolution formatters (resolve).

use super::shared::to_pretty_json;
use crate::error::{ApiError, ErrorKind};
use crate::tree::fs::EntryKind;
use crate::tree::path::display_path;
use serde::Serialize;
use std::path::PathBuf;

/// What the classifier knows about one path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveView {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_target: Option<PathBuf>,
    /// Traversal tag: file, directory, symlink_to_directory, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolveView {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

pub fn format_resolve_text(view: &ResolveView) -> String {
    let mut lines = vec![format!("Path: {}", display_path(&view.path))];
    if let Some(kind) = view.kind {
        let kind = match kind {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
            EntryKind::Symlink => "symlink",
        };
        lines.push(format!("  Kind: {}", kind));
    }
    if let Some(ref target) = view.link_target {
        lines.push(format!("  Link target: {}", target.display()));
    }
    if let Some(resolution) = view.resolution {
        lines.push(format!("  Resolution: {}", resolution));
    }
    if let Some(ref identity) = view.identity {
        lines.push(format!("  Identity: {}", display_path(identity)));
    }
    if let (Some(kind), Some(error)) = (view.error_kind, view.error.as_ref()) {
        lines.push(format!("  Error ({}): {}", kind, error));
    }
    lines.join("\n")
}

pub fn format_resolve_json(view: &ResolveView) -> Result<String, ApiError> {
    to_pretty_json(view)
}
