//! Attribute lookup for single paths.

use std::sync::Arc;

use crate::api::{BoxPolicy, Node};
use crate::config::DeepboxConfig;
use crate::error::{DeepboxError, Result};
use crate::features::require_id;
use crate::fs::classifier::{self, Level};
use crate::fs::{Acl, ContainerKind, PathAttributes, Role, UNKNOWN, VirtualPath};
use crate::resolver::IdProvider;

/// Attributes of a remote node, including the web preview link.
pub(crate) fn node_attributes(node: &Node, config: &DeepboxConfig) -> PathAttributes {
    let policy = node.policy;
    PathAttributes {
        file_id: Some(node.node_id.clone()),
        size: node
            .size
            .map(|size| i64::try_from(size).unwrap_or(i64::MAX))
            .unwrap_or(UNKNOWN),
        creation_date: node.created_millis().unwrap_or(UNKNOWN),
        modification_date: node.modified_millis().unwrap_or(UNKNOWN),
        link: Some(config.preview_url(&node.node_id)),
        acl: Acl::new()
            .grant_if(policy.can_delete, Role::CanDelete)
            .grant_if(policy.can_add_children, Role::CanAddChildren)
            .grant_if(policy.can_list_children, Role::CanListChildren),
    }
}

/// Whether a box listing shows the container of `kind`.
pub(crate) fn container_visible(kind: ContainerKind, policy: &BoxPolicy) -> bool {
    match kind {
        ContainerKind::Inbox => policy.can_list_queue,
        ContainerKind::Documents => policy.can_list_files_root || policy.can_add_files_root,
        ContainerKind::Trash => policy.can_access_trash,
    }
}

/// Permissions on a third-level container derived from its box policy.
pub(crate) fn container_acl(kind: ContainerKind, policy: &BoxPolicy) -> Acl {
    match kind {
        ContainerKind::Inbox => Acl::new()
            .grant_if(policy.can_list_queue, Role::CanListChildren)
            .grant_if(policy.can_add_queue, Role::CanAddChildren),
        ContainerKind::Documents => Acl::new()
            .grant_if(policy.can_list_files_root, Role::CanListChildren)
            .grant_if(policy.can_add_files_root, Role::CanAddChildren),
        ContainerKind::Trash => Acl::new().grant_if(policy.can_access_trash, Role::CanListChildren),
    }
}

/// Looks up the [`PathAttributes`] of one path.
#[derive(Clone)]
pub struct AttributesFinder {
    ids: IdProvider,
    config: Arc<DeepboxConfig>,
}

impl AttributesFinder {
    pub fn new(ids: IdProvider, config: Arc<DeepboxConfig>) -> Self {
        Self { ids, config }
    }

    /// Attributes of `path`.
    ///
    /// Fails with [`DeepboxError::NotFound`] when the path does not resolve.
    pub async fn find(&self, path: &VirtualPath) -> Result<PathAttributes> {
        self.lookup(path)
            .await
            .map_err(|err| err.for_path(path.absolute()))
    }

    async fn lookup(&self, path: &VirtualPath) -> Result<PathAttributes> {
        let catalog = self.ids.catalog();
        match classifier::level(path) {
            Level::Root => Ok(PathAttributes::default()),
            Level::Organization => {
                let deep_box = require_id(self.ids.deep_box_id(path).await?, path)?;
                let deep_box = catalog.get_deep_box(&deep_box).await?;
                Ok(PathAttributes::default().with_file_id(deep_box.deep_box_node_id))
            }
            Level::Box => {
                let deep_box = require_id(self.ids.deep_box_id(path).await?, path)?;
                let box_id = require_id(self.ids.box_id(path).await?, path)?;
                let entry = catalog.get_box(&deep_box, &box_id).await?;
                Ok(PathAttributes::default().with_file_id(entry.box_node_id))
            }
            Level::ThirdLevel => {
                let file_id = require_id(self.ids.file_id(path).await?, path)?;
                let Some(kind) = classifier::third_level_kind(path) else {
                    return Err(DeepboxError::NotFound(path.absolute()));
                };
                let deep_box = require_id(self.ids.deep_box_id(path).await?, path)?;
                let box_id = require_id(self.ids.box_id(path).await?, path)?;
                let entry = catalog.get_box(&deep_box, &box_id).await?;
                Ok(PathAttributes::default()
                    .with_file_id(file_id)
                    .with_acl(container_acl(kind, &entry.box_policy)))
            }
            Level::Descendant => {
                let file_id = require_id(self.ids.file_id(path).await?, path)?;
                let info = catalog.get_node_info(&file_id).await?;
                Ok(node_attributes(&info.node, &self.config))
            }
        }
    }
}
