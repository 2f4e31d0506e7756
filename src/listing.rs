//! Complete, de-duplicated directory listings.
//!
//! Every page of a listing is fetched before the result is returned. Nodes
//! sharing a name collapse into the most recently modified one, across page
//! boundaries, and the identifier of the survivor is written to the cache
//! each time the name is seen. Listing a directory therefore also warms the
//! cache for all of its children.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::{BoxEntry, DeepBox, ListOrder, Node, NodeScope};
use crate::attributes::{container_acl, container_visible, node_attributes};
use crate::config::DeepboxConfig;
use crate::error::{DeepboxError, Result};
use crate::features::require_id;
use crate::fs::classifier::{self, Level, THIRD_LEVEL_DEPTH};
use crate::fs::{ContainerKind, PathAttributes, PathType, VirtualPath, normalize_name};
use crate::pagination::PageInfo;
use crate::progress::{ListProgress, ListProgressCallback};
use crate::resolver::IdProvider;

/// Children of a directory with their attributes, in listing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributedList {
    entries: Vec<(VirtualPath, PathAttributes)>,
}

impl AttributedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: VirtualPath, attributes: PathAttributes) {
        self.entries.push((path, attributes));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(VirtualPath, PathAttributes)> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &VirtualPath> {
        self.entries.iter().map(|(path, _)| path)
    }

    /// Entry with the given name.
    pub fn find(&self, name: &str) -> Option<&(VirtualPath, PathAttributes)> {
        self.entries.iter().find(|(path, _)| path.name() == name)
    }
}

impl IntoIterator for AttributedList {
    type Item = (VirtualPath, PathAttributes);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Collects one listing, keeping the newest node per name.
struct Collector<'a> {
    directory: &'a VirtualPath,
    ids: &'a IdProvider,
    list: AttributedList,
    by_name: HashMap<String, usize>,
}

impl<'a> Collector<'a> {
    fn new(directory: &'a VirtualPath, ids: &'a IdProvider) -> Self {
        Self {
            directory,
            ids,
            list: AttributedList::new(),
            by_name: HashMap::new(),
        }
    }

    fn add(&mut self, name: &str, path_type: PathType, volume: bool, attributes: PathAttributes) {
        let name = normalize_name(name);
        let key = self.ids.cache().case_sensitivity().fold(&name);
        let mut path = self.directory.child(&name, path_type).with_volume(volume);
        if let Some(file_id) = &attributes.file_id {
            path = path.with_file_id(file_id.clone());
        }

        let index = match self.by_name.get(&key) {
            Some(&index) => {
                let (_, existing) = &self.list.entries[index];
                if attributes.modification_date > existing.modification_date {
                    debug!(path = %path, "newer duplicate replaces listed node");
                    self.list.entries[index] = (path, attributes);
                }
                index
            }
            None => {
                self.by_name.insert(key, self.list.len());
                self.list.push(path, attributes);
                self.list.len() - 1
            }
        };
        let (survivor, attributes) = &self.list.entries[index];
        self.ids.cache_id(survivor, attributes.file_id.clone());
    }

    fn add_node(&mut self, node: &Node, config: &DeepboxConfig) {
        let path_type = if node.is_folder() {
            PathType::Directory
        } else {
            PathType::File
        };
        self.add(&node.name, path_type, false, node_attributes(node, config));
    }

    fn report(&self, progress: &mut ListProgressCallback, info: PageInfo) -> Result<()> {
        let update = ListProgress::new(self.directory.absolute(), info.number, self.list.len(), info.total);
        if progress(&update) {
            Ok(())
        } else {
            Err(DeepboxError::Cancelled)
        }
    }
}

/// Lists directories at every level of the hierarchy.
#[derive(Clone)]
pub struct ListService {
    ids: IdProvider,
    config: Arc<DeepboxConfig>,
}

impl ListService {
    pub fn new(ids: IdProvider, config: Arc<DeepboxConfig>) -> Self {
        Self { ids, config }
    }

    /// Every child of `directory`.
    pub async fn list(&self, directory: &VirtualPath) -> Result<AttributedList> {
        self.list_with_progress(directory, Box::new(|_| true)).await
    }

    /// Every child of `directory`, reporting after each fetched page.
    ///
    /// A callback returning `false` aborts with [`DeepboxError::Cancelled`].
    pub async fn list_with_progress(
        &self,
        directory: &VirtualPath,
        mut progress: ListProgressCallback,
    ) -> Result<AttributedList> {
        debug!(directory = %directory, "list");
        let listed = match classifier::level(directory) {
            Level::Root => self.list_deep_boxes(directory, &mut progress).await,
            Level::Organization => self.list_boxes(directory, &mut progress).await,
            Level::Box => self.list_containers(directory, &mut progress).await,
            Level::ThirdLevel | Level::Descendant => self.list_nodes(directory, &mut progress).await,
        };
        listed.map_err(|err| err.for_path(directory.absolute()))
    }

    async fn list_deep_boxes(
        &self,
        directory: &VirtualPath,
        progress: &mut ListProgressCallback,
    ) -> Result<AttributedList> {
        let catalog = self.ids.catalog().as_ref();
        let mut collector = Collector::new(directory, &self.ids);
        self.ids
            .pager()
            .for_each(
                |offset, limit| catalog.list_deep_boxes(offset, limit, ListOrder::NameAsc),
                |items: Vec<DeepBox>, info| {
                    for deep_box in items {
                        let attributes = PathAttributes::default().with_file_id(deep_box.deep_box_node_id);
                        collector.add(&deep_box.name, PathType::Directory, true, attributes);
                    }
                    collector.report(progress, info)
                },
            )
            .await?;
        Ok(collector.list)
    }

    async fn list_boxes(
        &self,
        directory: &VirtualPath,
        progress: &mut ListProgressCallback,
    ) -> Result<AttributedList> {
        let deep_box = require_id(self.ids.file_id(directory).await?, directory)?;
        let catalog = self.ids.catalog().as_ref();
        let mut collector = Collector::new(directory, &self.ids);
        self.ids
            .pager()
            .for_each(
                |offset, limit| catalog.list_boxes(&deep_box, offset, limit, ListOrder::NameAsc),
                |items: Vec<BoxEntry>, info| {
                    for entry in items {
                        let attributes = PathAttributes::default().with_file_id(entry.box_node_id);
                        collector.add(&entry.name, PathType::Directory, true, attributes);
                    }
                    collector.report(progress, info)
                },
            )
            .await?;
        Ok(collector.list)
    }

    /// Inbox, Documents and Trash as far as the box policy shows them.
    async fn list_containers(
        &self,
        directory: &VirtualPath,
        progress: &mut ListProgressCallback,
    ) -> Result<AttributedList> {
        let deep_box = require_id(self.ids.deep_box_id(directory).await?, directory)?;
        let box_id = require_id(self.ids.file_id(directory).await?, directory)?;
        let entry = self.ids.catalog().get_box(&deep_box, &box_id).await?;
        let policy = entry.box_policy;

        let mut collector = Collector::new(directory, &self.ids);
        for kind in ContainerKind::ALL {
            if !container_visible(kind, &policy) {
                continue;
            }
            let name = self.config.locale.name_of(kind);
            let file_id = self.ids.scheme().third_level_id(&box_id, kind, name);
            let attributes = PathAttributes::default()
                .with_file_id(file_id)
                .with_acl(container_acl(kind, &policy));
            collector.add(name, PathType::Directory, true, attributes);
        }
        let shown = collector.list.len() as u64;
        collector.report(
            progress,
            PageInfo {
                number: 1,
                total: shown,
            },
        )?;
        Ok(collector.list)
    }

    async fn list_nodes(
        &self,
        directory: &VirtualPath,
        progress: &mut ListProgressCallback,
    ) -> Result<AttributedList> {
        let Some(kind) = classifier::container_kind(directory) else {
            return Err(DeepboxError::NotFound(directory.absolute()));
        };
        if classifier::is_descendant_of(directory, ContainerKind::Inbox) {
            // The inbox has no folders.
            return Ok(AttributedList::new());
        }

        let deep_box = require_id(self.ids.deep_box_id(directory).await?, directory)?;
        let box_id = require_id(self.ids.box_id(directory).await?, directory)?;
        let parent = if directory.depth() > THIRD_LEVEL_DEPTH {
            Some(require_id(self.ids.file_id(directory).await?, directory)?)
        } else {
            None
        };
        let scope = match &parent {
            Some(parent) => NodeScope::folder(kind, &deep_box, &box_id, parent),
            None => Some(NodeScope::container(kind, &deep_box, &box_id)),
        };
        let Some(scope) = scope else {
            return Ok(AttributedList::new());
        };

        let catalog = self.ids.catalog().as_ref();
        let config = self.config.as_ref();
        let mut collector = Collector::new(directory, &self.ids);
        let fetched = self
            .ids
            .pager()
            .for_each(
                move |offset, limit| scope.fetch(catalog, offset, limit, ListOrder::ModifiedDesc),
                |items: Vec<Node>, info| {
                    for node in &items {
                        collector.add_node(node, config);
                    }
                    collector.report(progress, info)
                },
            )
            .await;
        match fetched {
            Ok(()) => Ok(collector.list),
            Err(err) if err.is_forbidden() && parent.is_none() => {
                warn!(directory = %directory, container = %kind, "listing forbidden, no children");
                Ok(AttributedList::new())
            }
            Err(err) => Err(err),
        }
    }
}
