//! Checks run before creating files and folders.
//!
//! Nothing can be created at the root, in an organization or directly in a
//! box. Below that the parent must grant `canAddChildren` and the name must
//! be free. The inbox takes files but no folders.

use tracing::{debug, warn};

use super::require_id;
use crate::attributes::AttributesFinder;
use crate::error::{DeepboxError, Result};
use crate::fs::classifier::{self, Level};
use crate::fs::{ContainerKind, PathType, Role, VirtualPath};
use crate::resolver::IdProvider;

async fn preflight(
    ids: &IdProvider,
    attributes: &AttributesFinder,
    workdir: &VirtualPath,
    name: &str,
    path_type: PathType,
) -> Result<()> {
    let target = workdir.child(name, path_type);
    if matches!(
        classifier::level(workdir),
        Level::Root | Level::Organization | Level::Box
    ) {
        return Err(DeepboxError::AccessDenied(format!("cannot create {}", target)));
    }
    let acl = attributes.find(workdir).await?.acl;
    if !acl.allows(Role::CanAddChildren) {
        warn!(workdir = %workdir, role = %Role::CanAddChildren, "ACL does not include role");
        return Err(DeepboxError::AccessDenied(format!("cannot create {}", target)));
    }
    if ids.file_id(&target).await?.is_some() {
        warn!(target = %target, "target already exists");
        return Err(DeepboxError::Conflict(target.absolute()));
    }
    Ok(())
}

/// Preflight for new files.
#[derive(Clone)]
pub struct TouchFeature {
    ids: IdProvider,
    attributes: AttributesFinder,
}

impl TouchFeature {
    pub fn new(ids: IdProvider, attributes: AttributesFinder) -> Self {
        Self { ids, attributes }
    }

    pub async fn preflight(&self, workdir: &VirtualPath, filename: &str) -> Result<()> {
        preflight(&self.ids, &self.attributes, workdir, filename, PathType::File).await
    }
}

/// Folder creation in the Documents tree.
#[derive(Clone)]
pub struct DirectoryFeature {
    ids: IdProvider,
    attributes: AttributesFinder,
}

impl DirectoryFeature {
    pub fn new(ids: IdProvider, attributes: AttributesFinder) -> Self {
        Self { ids, attributes }
    }

    pub async fn preflight(&self, workdir: &VirtualPath, name: &str) -> Result<()> {
        if classifier::container_kind(workdir) == Some(ContainerKind::Inbox) {
            return Err(DeepboxError::AccessDenied(format!(
                "cannot create folder {} in inbox",
                workdir.child(name, PathType::Directory)
            )));
        }
        preflight(&self.ids, &self.attributes, workdir, name, PathType::Directory).await
    }

    /// Create folder `name` in `workdir`, returning its path with the new
    /// identifier attached. The new path replaces any cached absence.
    pub async fn mkdir(&self, workdir: &VirtualPath, name: &str) -> Result<VirtualPath> {
        self.preflight(workdir, name).await?;
        if classifier::container_kind(workdir) != Some(ContainerKind::Documents) {
            return Err(DeepboxError::Unsupported(format!(
                "cannot create folder {}",
                workdir.child(name, PathType::Directory)
            )));
        }
        let target = workdir.child(name, PathType::Directory);
        let deep_box = require_id(self.ids.deep_box_id(workdir).await?, workdir)?;
        let box_id = require_id(self.ids.box_id(workdir).await?, workdir)?;
        let parent = match classifier::level(workdir) {
            Level::ThirdLevel => None,
            _ => Some(require_id(self.ids.file_id(workdir).await?, workdir)?),
        };

        debug!(target = %target, parent = ?parent, "mkdir");
        let created = self
            .ids
            .catalog()
            .create_folder(&deep_box, &box_id, parent.as_deref(), name)
            .await
            .map_err(|err| err.for_path(target.absolute()))?;
        self.ids.cache().invalidate_tree(&target);
        self.ids.cache_id(&target, Some(created.node_id.clone()));
        Ok(target.with_file_id(created.node_id))
    }
}
