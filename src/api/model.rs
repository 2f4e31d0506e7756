//! Wire types of the DeepBox JSON API.
//!
//! Only the fields the connector reads are modelled; unknown fields are
//! ignored by serde.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of a paginated listing together with the total item count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items of this page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub size: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, size: u64) -> Self {
        Self { items, size }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            size: 0,
        }
    }
}

/// Sort key sent with listing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Display name ascending
    NameAsc,
    /// Most recently modified first
    ModifiedDesc,
}

impl ListOrder {
    /// Value of the `order` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListOrder::NameAsc => "displayName asc",
            ListOrder::ModifiedDesc => "modifiedTime desc",
        }
    }
}

/// An organization ("DeepBox").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepBox {
    pub deep_box_node_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeepBoxes {
    #[serde(default)]
    pub deep_boxes: Vec<DeepBox>,
    #[serde(default)]
    pub size: u64,
}

/// Visibility flags of a box for the current principal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxPolicy {
    pub can_list_queue: bool,
    pub can_add_queue: bool,
    pub can_list_files_root: bool,
    pub can_add_files_root: bool,
    pub can_access_trash: bool,
    pub can_purge_trash: bool,
}

/// A box inside an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxEntry {
    pub box_node_id: String,
    pub name: String,
    #[serde(default)]
    pub box_policy: BoxPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Boxes {
    #[serde(default)]
    pub boxes: Vec<BoxEntry>,
    #[serde(default)]
    pub size: u64,
}

/// Kind of a remote node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    File,
    Folder,
    #[serde(other)]
    Unknown,
}

/// Per-node permissions for the current principal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodePolicy {
    pub can_delete: bool,
    pub can_add_children: bool,
    pub can_list_children: bool,
}

/// Creation or modification stamp of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTimestamp {
    pub time: DateTime<Utc>,
}

/// A file or folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub node_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub created: Option<NodeTimestamp>,
    #[serde(default)]
    pub modified: Option<NodeTimestamp>,
    #[serde(default)]
    pub policy: NodePolicy,
}

impl Node {
    pub fn is_folder(&self) -> bool {
        self.node_type == NodeType::Folder
    }

    /// Modification time in milliseconds since the epoch, if known.
    pub fn modified_millis(&self) -> Option<i64> {
        self.modified.map(|m| m.time.timestamp_millis())
    }

    /// Creation time in milliseconds since the epoch, if known.
    pub fn created_millis(&self) -> Option<i64> {
        self.created.map(|c| c.time.timestamp_millis())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NodeContent {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub size: u64,
}

/// Single-node metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub node: Node,
}

impl From<DeepBoxes> for Page<DeepBox> {
    fn from(value: DeepBoxes) -> Self {
        Page::new(value.deep_boxes, value.size)
    }
}

impl From<Boxes> for Page<BoxEntry> {
    fn from(value: Boxes) -> Self {
        Page::new(value.boxes, value.size)
    }
}

impl From<NodeContent> for Page<Node> {
    fn from(value: NodeContent) -> Self {
        Page::new(value.nodes, value.size)
    }
}
