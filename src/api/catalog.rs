//! The remote catalog seen by the connector.

use async_trait::async_trait;

use super::model::{BoxEntry, DeepBox, ListOrder, Node, NodeInfo, Page};
use crate::error::Result;
use crate::fs::ContainerKind;

/// Paginated read operations and node mutations of the DeepBox API.
///
/// Every call may fail with [`crate::DeepboxError::Api`] carrying the HTTP
/// status; callers treat 403 as "forbidden/absent" and 404 as "not found".
/// Implementations must not retry.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Organizations visible to the principal.
    async fn list_deep_boxes(&self, offset: u64, limit: u32, order: ListOrder)
    -> Result<Page<DeepBox>>;

    async fn get_deep_box(&self, deep_box: &str) -> Result<DeepBox>;

    /// Boxes of one organization.
    async fn list_boxes(
        &self,
        deep_box: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<BoxEntry>>;

    /// A single box including its policy flags.
    async fn get_box(&self, deep_box: &str, box_id: &str) -> Result<BoxEntry>;

    /// Inbox content. The inbox is flat.
    async fn list_queue(
        &self,
        deep_box: &str,
        box_id: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>>;

    /// Root of the Documents tree.
    async fn list_files(
        &self,
        deep_box: &str,
        box_id: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>>;

    /// Children of a folder in the Documents tree.
    async fn list_files_in(
        &self,
        deep_box: &str,
        box_id: &str,
        parent: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>>;

    /// Root of the Trash tree.
    async fn list_trash(
        &self,
        deep_box: &str,
        box_id: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>>;

    /// Children of a folder in the Trash tree.
    async fn list_trash_in(
        &self,
        deep_box: &str,
        box_id: &str,
        parent: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>>;

    async fn get_node_info(&self, node: &str) -> Result<NodeInfo>;

    /// Delete a node. Without `purge` the backend moves it to the trash.
    async fn delete_node(&self, node: &str, purge: bool) -> Result<()>;

    /// Move a trashed node back to where it was deleted from.
    async fn restore_node(&self, node: &str) -> Result<()>;

    /// Create a folder in the Documents tree, below `parent` or at its top.
    async fn create_folder(
        &self,
        deep_box: &str,
        box_id: &str,
        parent: Option<&str>,
        name: &str,
    ) -> Result<Node>;

    async fn move_node(&self, node: &str, target_parent: &str) -> Result<()>;

    /// Rename a node.
    async fn update_node(&self, node: &str, name: &str) -> Result<()>;

    /// Copy a node below `target_parent`, returning the copy.
    async fn copy_node(&self, node: &str, target_parent: &str) -> Result<Node>;
}

/// Which node listing endpoint to page through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeScope<'a> {
    Queue { deep_box: &'a str, box_id: &'a str },
    Files { deep_box: &'a str, box_id: &'a str },
    FilesIn { deep_box: &'a str, box_id: &'a str, parent: &'a str },
    Trash { deep_box: &'a str, box_id: &'a str },
    TrashIn { deep_box: &'a str, box_id: &'a str, parent: &'a str },
}

impl<'a> NodeScope<'a> {
    /// Endpoint listing the top of a third-level container.
    pub fn container(kind: ContainerKind, deep_box: &'a str, box_id: &'a str) -> Self {
        match kind {
            ContainerKind::Inbox => NodeScope::Queue { deep_box, box_id },
            ContainerKind::Documents => NodeScope::Files { deep_box, box_id },
            ContainerKind::Trash => NodeScope::Trash { deep_box, box_id },
        }
    }

    /// Endpoint listing a folder below a third-level container.
    ///
    /// `None` for the inbox, which has no folders.
    pub fn folder(
        kind: ContainerKind,
        deep_box: &'a str,
        box_id: &'a str,
        parent: &'a str,
    ) -> Option<Self> {
        match kind {
            ContainerKind::Inbox => None,
            ContainerKind::Documents => Some(NodeScope::FilesIn {
                deep_box,
                box_id,
                parent,
            }),
            ContainerKind::Trash => Some(NodeScope::TrashIn {
                deep_box,
                box_id,
                parent,
            }),
        }
    }

    /// Fetch one page from this endpoint.
    pub async fn fetch(
        self,
        catalog: &dyn Catalog,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>> {
        match self {
            NodeScope::Queue { deep_box, box_id } => {
                catalog.list_queue(deep_box, box_id, offset, limit, order).await
            }
            NodeScope::Files { deep_box, box_id } => {
                catalog.list_files(deep_box, box_id, offset, limit, order).await
            }
            NodeScope::FilesIn {
                deep_box,
                box_id,
                parent,
            } => {
                catalog
                    .list_files_in(deep_box, box_id, parent, offset, limit, order)
                    .await
            }
            NodeScope::Trash { deep_box, box_id } => {
                catalog.list_trash(deep_box, box_id, offset, limit, order).await
            }
            NodeScope::TrashIn {
                deep_box,
                box_id,
                parent,
            } => {
                catalog
                    .list_trash_in(deep_box, box_id, parent, offset, limit, order)
                    .await
            }
        }
    }
}
