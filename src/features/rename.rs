//! Moving and renaming nodes.

use tracing::{debug, warn};

use super::{DeleteFeature, require_id, require_node_path};
use crate::error::{DeepboxError, Result};
use crate::fs::classifier::{self, THIRD_LEVEL_DEPTH};
use crate::fs::{ContainerKind, VirtualPath};
use crate::resolver::IdProvider;

#[derive(Clone)]
pub struct MoveFeature {
    ids: IdProvider,
    delete: DeleteFeature,
}

impl MoveFeature {
    pub fn new(ids: IdProvider, delete: DeleteFeature) -> Self {
        Self { ids, delete }
    }

    /// Only nodes move, and never into a folder of the inbox.
    pub fn preflight(&self, source: &VirtualPath, target: &VirtualPath) -> Result<()> {
        require_node_path(source, "move")?;
        require_node_path(target, "move to")?;
        if target.depth() > THIRD_LEVEL_DEPTH + 1
            && classifier::is_descendant_of(target, ContainerKind::Inbox)
        {
            return Err(DeepboxError::AccessDenied(format!("cannot move to {}", target)));
        }
        Ok(())
    }

    /// Move `source` to `target`, renaming it when the names differ.
    ///
    /// An existing node at `target` is deleted first when `overwrite` is set,
    /// otherwise the move fails with [`DeepboxError::Conflict`]. The returned
    /// path carries the identifier of the moved node.
    ///
    /// A target directly below Inbox, Documents or Trash is sent with the
    /// container's [`crate::IdentifierScheme`] identifier as its parent,
    /// which the backend has to accept as that container's root.
    pub async fn rename(
        &self,
        source: &VirtualPath,
        target: &VirtualPath,
        overwrite: bool,
    ) -> Result<VirtualPath> {
        self.preflight(source, target)?;
        self.move_node(source, target, overwrite)
            .await
            .map_err(|err| err.for_path(source.absolute()))
    }

    async fn move_node(
        &self,
        source: &VirtualPath,
        target: &VirtualPath,
        overwrite: bool,
    ) -> Result<VirtualPath> {
        let file_id = require_id(self.ids.file_id(source).await?, source)?;
        let target = target.clone().without_file_id();

        if let Some(existing) = self.ids.file_id(&target).await? {
            // A case-only rename finds the source itself.
            if existing != file_id {
                if !overwrite {
                    return Err(DeepboxError::Conflict(target.absolute()));
                }
                warn!(target = %target, source = %source, "deleting target to be replaced");
                self.delete.delete(std::slice::from_ref(&target)).await?;
            }
        }

        let catalog = self.ids.catalog();
        if source.parent() != target.parent() {
            let parent = target
                .parent()
                .ok_or_else(|| DeepboxError::NotFound(target.absolute()))?;
            let parent_id = require_id(self.ids.file_id(&parent).await?, &parent)?;
            debug!(file_id = %file_id, parent_id = %parent_id, "move node");
            catalog.move_node(&file_id, &parent_id).await?;
        }
        if source.name() != target.name() {
            debug!(file_id = %file_id, name = %target.name(), "rename node");
            catalog.update_node(&file_id, target.name()).await?;
        }

        self.ids.cache().invalidate_tree(source);
        self.ids.cache_id(&target, Some(file_id.clone()));
        Ok(target.with_file_id(file_id))
    }
}
