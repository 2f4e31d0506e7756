//! In-memory [`Catalog`] for tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use super::catalog::Catalog;
use super::model::{
    BoxEntry, BoxPolicy, DeepBox, ListOrder, Node, NodeInfo, NodePolicy, NodeTimestamp, NodeType,
    Page,
};
use crate::error::{DeepboxError, Result};
use crate::fs::ContainerKind;

#[derive(Debug, Clone)]
struct Stored {
    node: Node,
    deep_box: String,
    box_id: String,
    kind: ContainerKind,
    parent: Option<String>,
    /// Where a trashed node came from.
    origin: Option<(ContainerKind, Option<String>)>,
}

#[derive(Debug, Default)]
struct State {
    deep_boxes: Vec<DeepBox>,
    boxes: HashMap<String, Vec<BoxEntry>>,
    nodes: Vec<Stored>,
    forbidden: HashSet<(String, ContainerKind)>,
    calls: HashMap<&'static str, usize>,
    copies: usize,
    folders: usize,
}

/// Counts every call so tests can assert on remote traffic.
#[derive(Debug, Default)]
pub(crate) struct MockCatalog {
    state: Mutex<State>,
}

pub(crate) fn folder(id: &str, name: &str, modified: i64) -> Node {
    node(id, name, NodeType::Folder, None, modified)
}

pub(crate) fn file(id: &str, name: &str, size: u64, modified: i64) -> Node {
    node(id, name, NodeType::File, Some(size), modified)
}

fn node(id: &str, name: &str, node_type: NodeType, size: Option<u64>, modified: i64) -> Node {
    let stamp = |secs: i64| NodeTimestamp {
        time: Utc.timestamp_opt(secs, 0).unwrap(),
    };
    Node {
        node_id: id.to_string(),
        name: name.to_string(),
        node_type,
        size,
        created: Some(stamp(0)),
        modified: Some(stamp(modified)),
        policy: NodePolicy {
            can_delete: true,
            can_add_children: node_type == NodeType::Folder,
            can_list_children: node_type == NodeType::Folder,
        },
    }
}

pub(crate) fn full_policy() -> BoxPolicy {
    BoxPolicy {
        can_list_queue: true,
        can_add_queue: true,
        can_list_files_root: true,
        can_add_files_root: true,
        can_access_trash: true,
        can_purge_trash: true,
    }
}

fn page<T: Clone>(items: &[T], offset: u64, limit: u32) -> Page<T> {
    let slice = items
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect();
    Page::new(slice, items.len() as u64)
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_deep_box(&self, id: &str, name: &str) -> &Self {
        let mut state = self.state.lock().unwrap();
        state.deep_boxes.push(DeepBox {
            deep_box_node_id: id.to_string(),
            name: name.to_string(),
        });
        drop(state);
        self
    }

    pub fn add_box(&self, deep_box: &str, id: &str, name: &str, policy: BoxPolicy) -> &Self {
        let mut state = self.state.lock().unwrap();
        state
            .boxes
            .entry(deep_box.to_string())
            .or_default()
            .push(BoxEntry {
                box_node_id: id.to_string(),
                name: name.to_string(),
                box_policy: policy,
            });
        drop(state);
        self
    }

    /// Store a node; `parent` is `None` for the top of the container.
    pub fn add_node(
        &self,
        deep_box: &str,
        box_id: &str,
        kind: ContainerKind,
        parent: Option<&str>,
        node: Node,
    ) -> &Self {
        let mut state = self.state.lock().unwrap();
        state.nodes.push(Stored {
            node,
            deep_box: deep_box.to_string(),
            box_id: box_id.to_string(),
            kind,
            parent: parent.map(str::to_string),
            origin: None,
        });
        drop(state);
        self
    }

    /// Answer 403 for every listing of `kind` in `box_id`.
    pub fn forbid(&self, box_id: &str, kind: ContainerKind) -> &Self {
        self.state
            .lock()
            .unwrap()
            .forbidden
            .insert((box_id.to_string(), kind));
        self
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls.values().sum()
    }

    pub fn calls_to(&self, method: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(method)
            .copied()
            .unwrap_or(0)
    }

    pub fn reset_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// True if the node exists outside the trash.
    pub fn contains(&self, node_id: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .nodes
            .iter()
            .any(|s| s.node.node_id == node_id && s.kind != ContainerKind::Trash)
    }

    pub fn in_trash(&self, node_id: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .nodes
            .iter()
            .any(|s| s.node.node_id == node_id && s.kind == ContainerKind::Trash)
    }

    pub fn node(&self, node_id: &str) -> Option<Node> {
        self.state
            .lock()
            .unwrap()
            .nodes
            .iter()
            .find(|s| s.node.node_id == node_id)
            .map(|s| s.node.clone())
    }

    pub fn parent_of(&self, node_id: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .nodes
            .iter()
            .find(|s| s.node.node_id == node_id)
            .and_then(|s| s.parent.clone())
    }

    fn record(state: &mut State, method: &'static str) {
        *state.calls.entry(method).or_default() += 1;
    }

    #[allow(clippy::too_many_arguments)]
    fn nodes(
        &self,
        method: &'static str,
        deep_box: &str,
        box_id: &str,
        kind: ContainerKind,
        parent: Option<&str>,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, method);
        if state.forbidden.contains(&(box_id.to_string(), kind)) {
            return Err(DeepboxError::from_status(403));
        }
        if let Some(parent) = parent {
            if !state.nodes.iter().any(|s| s.node.node_id == parent) {
                return Err(DeepboxError::from_status(404));
            }
        }
        let mut matching: Vec<Node> = state
            .nodes
            .iter()
            .filter(|s| {
                s.deep_box == deep_box
                    && s.box_id == box_id
                    && s.parent.as_deref() == parent
                    // Children belong to whatever container their folder is in.
                    && (parent.is_some() || s.kind == kind)
            })
            .map(|s| s.node.clone())
            .collect();
        match order {
            ListOrder::NameAsc => matching.sort_by(|a, b| a.name.cmp(&b.name)),
            ListOrder::ModifiedDesc => {
                matching.sort_by(|a, b| b.modified_millis().cmp(&a.modified_millis()))
            }
        }
        Ok(page(&matching, offset, limit))
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn list_deep_boxes(
        &self,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<DeepBox>> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "list_deep_boxes");
        let mut items = state.deep_boxes.clone();
        if order == ListOrder::NameAsc {
            items.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(page(&items, offset, limit))
    }

    async fn get_deep_box(&self, deep_box: &str) -> Result<DeepBox> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "get_deep_box");
        state
            .deep_boxes
            .iter()
            .find(|d| d.deep_box_node_id == deep_box)
            .cloned()
            .ok_or_else(|| DeepboxError::from_status(404))
    }

    async fn list_boxes(
        &self,
        deep_box: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<BoxEntry>> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "list_boxes");
        let mut items = state.boxes.get(deep_box).cloned().unwrap_or_default();
        if order == ListOrder::NameAsc {
            items.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(page(&items, offset, limit))
    }

    async fn get_box(&self, deep_box: &str, box_id: &str) -> Result<BoxEntry> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "get_box");
        state
            .boxes
            .get(deep_box)
            .and_then(|boxes| boxes.iter().find(|b| b.box_node_id == box_id))
            .cloned()
            .ok_or_else(|| DeepboxError::from_status(404))
    }

    async fn list_queue(
        &self,
        deep_box: &str,
        box_id: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>> {
        self.nodes(
            "list_queue",
            deep_box,
            box_id,
            ContainerKind::Inbox,
            None,
            offset,
            limit,
            order,
        )
    }

    async fn list_files(
        &self,
        deep_box: &str,
        box_id: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>> {
        self.nodes(
            "list_files",
            deep_box,
            box_id,
            ContainerKind::Documents,
            None,
            offset,
            limit,
            order,
        )
    }

    async fn list_files_in(
        &self,
        deep_box: &str,
        box_id: &str,
        parent: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>> {
        self.nodes(
            "list_files_in",
            deep_box,
            box_id,
            ContainerKind::Documents,
            Some(parent),
            offset,
            limit,
            order,
        )
    }

    async fn list_trash(
        &self,
        deep_box: &str,
        box_id: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>> {
        self.nodes(
            "list_trash",
            deep_box,
            box_id,
            ContainerKind::Trash,
            None,
            offset,
            limit,
            order,
        )
    }

    async fn list_trash_in(
        &self,
        deep_box: &str,
        box_id: &str,
        parent: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>> {
        self.nodes(
            "list_trash_in",
            deep_box,
            box_id,
            ContainerKind::Trash,
            Some(parent),
            offset,
            limit,
            order,
        )
    }

    async fn get_node_info(&self, node: &str) -> Result<NodeInfo> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "get_node_info");
        state
            .nodes
            .iter()
            .find(|s| s.node.node_id == node)
            .map(|s| NodeInfo {
                node: s.node.clone(),
            })
            .ok_or_else(|| DeepboxError::from_status(404))
    }

    /// Without `purge` the node moves to the top of the trash.
    async fn delete_node(&self, node: &str, purge: bool) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "delete_node");
        if purge {
            let before = state.nodes.len();
            state.nodes.retain(|s| s.node.node_id != node);
            if state.nodes.len() == before {
                return Err(DeepboxError::from_status(404));
            }
            return Ok(());
        }
        let stored = state
            .nodes
            .iter_mut()
            .find(|s| s.node.node_id == node)
            .ok_or_else(|| DeepboxError::from_status(404))?;
        if stored.kind == ContainerKind::Trash {
            return Err(DeepboxError::from_status(409));
        }
        stored.origin = Some((stored.kind, stored.parent.take()));
        stored.kind = ContainerKind::Trash;
        Ok(())
    }

    async fn restore_node(&self, node: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "restore_node");
        let stored = state
            .nodes
            .iter_mut()
            .find(|s| s.node.node_id == node)
            .ok_or_else(|| DeepboxError::from_status(404))?;
        let (kind, parent) = stored
            .origin
            .take()
            .ok_or_else(|| DeepboxError::from_status(409))?;
        stored.kind = kind;
        stored.parent = parent;
        Ok(())
    }

    async fn create_folder(
        &self,
        deep_box: &str,
        box_id: &str,
        parent: Option<&str>,
        name: &str,
    ) -> Result<Node> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "create_folder");
        let taken = state.nodes.iter().any(|s| {
            s.box_id == box_id
                && s.parent.as_deref() == parent
                && (parent.is_some() || s.kind == ContainerKind::Documents)
                && s.node.name == name
        });
        if taken {
            return Err(DeepboxError::from_status(409));
        }
        if let Some(parent) = parent {
            if !state.nodes.iter().any(|s| s.node.node_id == parent) {
                return Err(DeepboxError::from_status(404));
            }
        }
        state.folders += 1;
        let created = folder(&format!("new-{}", state.folders), name, 1_000 + state.folders as i64);
        state.nodes.push(Stored {
            node: created.clone(),
            deep_box: deep_box.to_string(),
            box_id: box_id.to_string(),
            kind: ContainerKind::Documents,
            parent: parent.map(str::to_string),
            origin: None,
        });
        Ok(created)
    }

    /// A target that is not a node is the top of the source's container.
    async fn move_node(&self, node: &str, target_parent: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "move_node");
        let target = state
            .nodes
            .iter()
            .find(|s| s.node.node_id == target_parent)
            .map(|s| s.kind);
        let stored = state
            .nodes
            .iter_mut()
            .find(|s| s.node.node_id == node)
            .ok_or_else(|| DeepboxError::from_status(404))?;
        match target {
            Some(kind) => {
                stored.kind = kind;
                stored.parent = Some(target_parent.to_string());
            }
            None => stored.parent = None,
        }
        Ok(())
    }

    async fn update_node(&self, node: &str, name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "update_node");
        let stored = state
            .nodes
            .iter_mut()
            .find(|s| s.node.node_id == node)
            .ok_or_else(|| DeepboxError::from_status(404))?;
        stored.node.name = name.to_string();
        Ok(())
    }

    async fn copy_node(&self, node: &str, target_parent: &str) -> Result<Node> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, "copy_node");
        let target = state
            .nodes
            .iter()
            .find(|s| s.node.node_id == target_parent)
            .map(|s| s.kind);
        let mut copy = state
            .nodes
            .iter()
            .find(|s| s.node.node_id == node)
            .cloned()
            .ok_or_else(|| DeepboxError::from_status(404))?;
        state.copies += 1;
        copy.node.node_id = format!("{}-copy{}", node, state.copies);
        match target {
            Some(kind) => {
                copy.kind = kind;
                copy.parent = Some(target_parent.to_string());
            }
            None => copy.parent = None,
        }
        let created = copy.node.clone();
        state.nodes.push(copy);
        Ok(created)
    }
}
