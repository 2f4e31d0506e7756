//! Filesystem operations built on the resolver and the attribute finder.

pub mod copy;
pub mod create;
pub mod delete;
pub mod find;
pub mod rename;
pub mod restore;

pub use copy::CopyFeature;
pub use create::{DirectoryFeature, TouchFeature};
pub use delete::DeleteFeature;
pub use find::FindFeature;
pub use rename::MoveFeature;
pub use restore::RestoreFeature;

use crate::error::{DeepboxError, Result};
use crate::fs::VirtualPath;
use crate::fs::classifier::THIRD_LEVEL_DEPTH;

/// Identifier or a not-found error naming `path`.
pub(crate) fn require_id(file_id: Option<String>, path: &VirtualPath) -> Result<String> {
    file_id.ok_or_else(|| DeepboxError::NotFound(path.absolute()))
}

/// Nodes only exist below Inbox, Documents and Trash.
pub(crate) fn require_node_path(path: &VirtualPath, operation: &str) -> Result<()> {
    if path.depth() <= THIRD_LEVEL_DEPTH {
        return Err(DeepboxError::AccessDenied(format!("cannot {} {}", operation, path)));
    }
    Ok(())
}
