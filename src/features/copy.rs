//! Server-side copies of files.

use tracing::{debug, warn};

use super::{DeleteFeature, require_id, require_node_path};
use crate::error::{DeepboxError, Result};
use crate::fs::VirtualPath;
use crate::resolver::IdProvider;

#[derive(Clone)]
pub struct CopyFeature {
    ids: IdProvider,
    delete: DeleteFeature,
}

impl CopyFeature {
    pub fn new(ids: IdProvider, delete: DeleteFeature) -> Self {
        Self { ids, delete }
    }

    /// Folders cannot be copied.
    pub fn preflight(&self, source: &VirtualPath, target: &VirtualPath) -> Result<()> {
        if source.is_directory() {
            return Err(DeepboxError::Unsupported(format!("cannot copy {}", source)));
        }
        require_node_path(source, "copy")?;
        require_node_path(target, "copy to")
    }

    /// Copy the file at `source` to `target`.
    ///
    /// An existing node at `target` is deleted first when `overwrite` is set,
    /// otherwise the copy fails with [`DeepboxError::Conflict`]. As with
    /// moves, a container root is addressed by its scheme identifier.
    pub async fn copy(
        &self,
        source: &VirtualPath,
        target: &VirtualPath,
        overwrite: bool,
    ) -> Result<VirtualPath> {
        self.preflight(source, target)?;
        self.copy_node(source, target, overwrite)
            .await
            .map_err(|err| err.for_path(source.absolute()))
    }

    async fn copy_node(
        &self,
        source: &VirtualPath,
        target: &VirtualPath,
        overwrite: bool,
    ) -> Result<VirtualPath> {
        let target = target.clone().without_file_id();
        if self.ids.file_id(&target).await?.is_some() {
            if !overwrite {
                return Err(DeepboxError::Conflict(target.absolute()));
            }
            warn!(target = %target, source = %source, "deleting target to be replaced");
            self.delete.delete(std::slice::from_ref(&target)).await?;
        }

        let parent = target
            .parent()
            .ok_or_else(|| DeepboxError::NotFound(target.absolute()))?;
        let parent_id = require_id(self.ids.file_id(&parent).await?, &parent)?;
        let node_id = require_id(self.ids.file_id(source).await?, source)?;

        let catalog = self.ids.catalog();
        let copied = catalog.copy_node(&node_id, &parent_id).await?;
        debug!(source = %node_id, copy = %copied.node_id, "copied node");
        if copied.name != target.name() {
            catalog.update_node(&copied.node_id, target.name()).await?;
        }

        self.ids.cache_id(&target, Some(copied.node_id.clone()));
        Ok(target.with_file_id(copied.node_id))
    }
}
