//! Resolution of virtual paths to DeepBox node identifiers.
//!
//! Every ancestor of a path is resolved root to leaf and cached before the
//! next one is looked up, so ancestors of a cached path are always cached
//! too. Organizations and boxes are found by listing and matching names,
//! the third level is computed by the [`IdentifierScheme`] without a network
//! call, and everything below by listing the matching container endpoint.

pub mod scheme;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub use scheme::{IdentifierScheme, SyntheticScheme, WellKnownScheme, scheme_for};

use crate::api::{BoxEntry, Catalog, DeepBox, ListOrder, Node, NodeScope};
use crate::cache::IdCache;
use crate::error::Result;
use crate::fs::classifier::{self, Level, THIRD_LEVEL_DEPTH};
use crate::fs::{VirtualPath, normalize_name};
use crate::pagination::Pager;

/// Resolves and caches remote identifiers.
///
/// Cheap to clone; clones share the catalog, the cache and the
/// cancellation token.
#[derive(Clone)]
pub struct IdProvider {
    catalog: Arc<dyn Catalog>,
    cache: Arc<IdCache>,
    scheme: Arc<dyn IdentifierScheme>,
    chunk_size: u32,
    cancel: CancellationToken,
}

impl IdProvider {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        cache: Arc<IdCache>,
        scheme: Arc<dyn IdentifierScheme>,
        chunk_size: u32,
    ) -> Self {
        Self {
            catalog,
            cache,
            scheme,
            chunk_size,
            cancel: CancellationToken::new(),
        }
    }

    /// Abort paginated lookups once `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.catalog
    }

    pub fn cache(&self) -> &Arc<IdCache> {
        &self.cache
    }

    pub fn scheme(&self) -> &Arc<dyn IdentifierScheme> {
        &self.scheme
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub(crate) fn pager(&self) -> Pager<'_> {
        Pager::new(self.chunk_size, &self.cancel)
    }

    /// Record the identifier of `path`, `None` meaning confirmed absent.
    pub fn cache_id(&self, path: &VirtualPath, file_id: Option<String>) {
        self.cache.cache(path, file_id);
    }

    /// Compare a remote name with a path segment under the session's case policy.
    pub(crate) fn name_matches(&self, remote: &str, segment: &str) -> bool {
        self.cache
            .case_sensitivity()
            .matches(&normalize_name(remote), segment)
    }

    /// Remote identifier of `path`.
    ///
    /// `Ok(None)` means the path does not exist (or is hidden by a 403 below
    /// a third-level container); `Err` means it could not be looked up.
    pub async fn file_id(&self, path: &VirtualPath) -> Result<Option<String>> {
        if path.is_root() {
            return Ok(None);
        }
        if let Some(file_id) = path.file_id() {
            return Ok(Some(file_id.to_string()));
        }
        // Only directories live at container depth. The key is shared with
        // the directory form, so nothing is cached for a file there.
        if path.is_file() && classifier::level(path) == Level::ThirdLevel {
            return Ok(None);
        }
        if let Some(cached) = self.cache.get(path) {
            debug!(path = %path, file_id = ?cached, "cache hit");
            return Ok(cached);
        }

        let lineage = path.lineage();
        let mut resolved: Vec<String> = Vec::with_capacity(lineage.len());
        for segment in &lineage {
            let file_id = match self.cache.get(segment) {
                Some(cached) => cached,
                None => {
                    let file_id = self.lookup(segment, &resolved).await?;
                    debug!(path = %segment, file_id = ?file_id, "resolved");
                    self.cache.cache(segment, file_id.clone());
                    file_id
                }
            };
            match file_id {
                Some(file_id) => resolved.push(file_id),
                None => return Ok(None),
            }
        }
        Ok(resolved.pop())
    }

    /// Identifier of the organization `path` lives in.
    pub async fn deep_box_id(&self, path: &VirtualPath) -> Result<Option<String>> {
        self.ancestor_id(path, 1).await
    }

    /// Identifier of the box `path` lives in.
    pub async fn box_id(&self, path: &VirtualPath) -> Result<Option<String>> {
        self.ancestor_id(path, 2).await
    }

    /// Identifier of the Inbox/Documents/Trash container `path` lives in.
    pub async fn third_level_id(&self, path: &VirtualPath) -> Result<Option<String>> {
        self.ancestor_id(path, THIRD_LEVEL_DEPTH).await
    }

    async fn ancestor_id(&self, path: &VirtualPath, depth: usize) -> Result<Option<String>> {
        if path.depth() == depth {
            return self.file_id(path).await;
        }
        match path.ancestor(depth) {
            Some(ancestor) => self.file_id(&ancestor).await,
            None => Ok(None),
        }
    }

    /// Look up one segment whose ancestors resolved to `ancestors`, root first.
    async fn lookup(&self, segment: &VirtualPath, ancestors: &[String]) -> Result<Option<String>> {
        let name = segment.name();
        match classifier::level(segment) {
            Level::Root => Ok(None),
            Level::Organization => self.find_deep_box(name).await,
            Level::Box => self.find_box(&ancestors[0], name).await,
            Level::ThirdLevel => Ok(classifier::third_level_kind(segment)
                .map(|kind| self.scheme.third_level_id(&ancestors[1], kind, name))),
            Level::Descendant => {
                let Some(kind) = classifier::container_kind(segment) else {
                    return Ok(None);
                };
                let (deep_box, box_id) = (&ancestors[0], &ancestors[1]);
                let scope = if segment.depth() == THIRD_LEVEL_DEPTH + 1 {
                    NodeScope::container(kind, deep_box, box_id)
                } else {
                    let parent = &ancestors[segment.depth() - 2];
                    match NodeScope::folder(kind, deep_box, box_id, parent) {
                        Some(scope) => scope,
                        // The inbox has no folders.
                        None => return Ok(None),
                    }
                };
                match self.find_node(scope, name).await {
                    Err(err) if err.is_forbidden() => {
                        warn!(path = %segment, container = %kind, "forbidden, treating as absent");
                        Ok(None)
                    }
                    other => other,
                }
            }
        }
    }

    async fn find_deep_box(&self, name: &str) -> Result<Option<String>> {
        let catalog = self.catalog.as_ref();
        let found = self
            .pager()
            .find(
                |offset, limit| catalog.list_deep_boxes(offset, limit, ListOrder::NameAsc),
                |deep_box: &DeepBox| self.name_matches(&deep_box.name, name),
            )
            .await?;
        Ok(found.map(|deep_box| deep_box.deep_box_node_id))
    }

    async fn find_box(&self, deep_box: &str, name: &str) -> Result<Option<String>> {
        let catalog = self.catalog.as_ref();
        let found = self
            .pager()
            .find(
                |offset, limit| catalog.list_boxes(deep_box, offset, limit, ListOrder::NameAsc),
                |entry: &BoxEntry| self.name_matches(&entry.name, name),
            )
            .await?;
        Ok(found.map(|entry| entry.box_node_id))
    }

    /// Newest node named `name`, the listing being ordered by modification time.
    async fn find_node(&self, scope: NodeScope<'_>, name: &str) -> Result<Option<String>> {
        let catalog = self.catalog.as_ref();
        let found = self
            .pager()
            .find(
                move |offset, limit| scope.fetch(catalog, offset, limit, ListOrder::ModifiedDesc),
                |node: &Node| self.name_matches(&node.name, name),
            )
            .await?;
        Ok(found.map(|node| node.node_id))
    }
}
