//! REST implementation of [`Catalog`] over the DeepBox `/api/v1` endpoints.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::catalog::Catalog;
use super::model::{BoxEntry, Boxes, DeepBox, DeepBoxes, ListOrder, Node, NodeContent, NodeInfo, Page};
use crate::config::DeepboxConfig;
use crate::error::{DeepboxError, Result};
use crate::http::HttpClient;

/// DeepBox API client.
///
/// The caller supplies an already valid OAuth bearer token; token refresh
/// belongs to the surrounding session layer.
#[derive(Debug, Clone)]
pub struct RestCatalog {
    http: HttpClient,
    base_url: String,
}

impl RestCatalog {
    /// Create a client for the API rooted at `config.base_url`.
    pub fn new(config: &DeepboxConfig, token: impl Into<String>) -> Self {
        let mut http = HttpClient::new(config.request_timeout());
        http.set_token(token);
        Self::with_http(http, &config.base_url)
    }

    /// Create a client on top of a preconfigured [`HttpClient`].
    pub fn with_http(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn box_url(&self, deep_box: &str, box_id: &str, rest: &str) -> String {
        self.url(&format!("/deepBoxes/{}/boxes/{}{}", deep_box, box_id, rest))
    }

    fn node_url(&self, node: &str, rest: &str) -> String {
        self.url(&format!("/nodes/{}{}", node, rest))
    }

    fn page_query(offset: u64, limit: u32, order: ListOrder) -> [(&'static str, String); 3] {
        [
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
            ("order", order.as_str().to_string()),
        ]
    }

    async fn nodes(&self, url: &str, offset: u64, limit: u32, order: ListOrder) -> Result<Page<Node>> {
        debug!(url, offset, limit, "list nodes");
        let content: NodeContent = self.http.get(url, &Self::page_query(offset, limit, order)).await?;
        Ok(content.into())
    }
}

#[async_trait]
impl Catalog for RestCatalog {
    async fn list_deep_boxes(
        &self,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<DeepBox>> {
        let url = self.url("/deepBoxes");
        let page: DeepBoxes = self.http.get(&url, &Self::page_query(offset, limit, order)).await?;
        Ok(page.into())
    }

    async fn get_deep_box(&self, deep_box: &str) -> Result<DeepBox> {
        self.http.get(&self.url(&format!("/deepBoxes/{}", deep_box)), &[]).await
    }

    async fn list_boxes(
        &self,
        deep_box: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<BoxEntry>> {
        let url = self.url(&format!("/deepBoxes/{}/boxes", deep_box));
        let page: Boxes = self.http.get(&url, &Self::page_query(offset, limit, order)).await?;
        Ok(page.into())
    }

    async fn get_box(&self, deep_box: &str, box_id: &str) -> Result<BoxEntry> {
        self.http.get(&self.box_url(deep_box, box_id, ""), &[]).await
    }

    async fn list_queue(
        &self,
        deep_box: &str,
        box_id: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>> {
        self.nodes(&self.box_url(deep_box, box_id, "/queue"), offset, limit, order)
            .await
    }

    async fn list_files(
        &self,
        deep_box: &str,
        box_id: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>> {
        self.nodes(&self.box_url(deep_box, box_id, "/files"), offset, limit, order)
            .await
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
        let url = self.box_url(deep_box, box_id, &format!("/files/{}", parent));
        self.nodes(&url, offset, limit, order).await
    }

    async fn list_trash(
        &self,
        deep_box: &str,
        box_id: &str,
        offset: u64,
        limit: u32,
        order: ListOrder,
    ) -> Result<Page<Node>> {
        self.nodes(&self.box_url(deep_box, box_id, "/trash"), offset, limit, order)
            .await
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
        let url = self.box_url(deep_box, box_id, &format!("/trash/{}", parent));
        self.nodes(&url, offset, limit, order).await
    }

    async fn get_node_info(&self, node: &str) -> Result<NodeInfo> {
        self.http.get(&self.node_url(node, "/info"), &[]).await
    }

    async fn delete_node(&self, node: &str, purge: bool) -> Result<()> {
        self.http
            .delete(&self.node_url(node, ""), &[("forcePurge", purge.to_string())])
            .await
    }

    async fn restore_node(&self, node: &str) -> Result<()> {
        self.http.post_empty(&self.node_url(node, "/restore"), &json!({})).await
    }

    async fn create_folder(
        &self,
        deep_box: &str,
        box_id: &str,
        parent: Option<&str>,
        name: &str,
    ) -> Result<Node> {
        let url = match parent {
            Some(parent) => self.box_url(deep_box, box_id, &format!("/files/{}/folders", parent)),
            None => self.box_url(deep_box, box_id, "/files/folders"),
        };
        let body = json!([{ "name": name }]);
        let created: Vec<Node> = self.http.post(&url, &body).await?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| DeepboxError::NotFound(name.to_string()))
    }

    async fn move_node(&self, node: &str, target_parent: &str) -> Result<()> {
        let body = json!({ "targetParentNodeId": target_parent });
        self.http.post_empty(&self.node_url(node, "/move"), &body).await
    }

    async fn update_node(&self, node: &str, name: &str) -> Result<()> {
        let body = json!({ "name": name });
        self.http.put(&self.node_url(node, ""), &body).await
    }

    async fn copy_node(&self, node: &str, target_parent: &str) -> Result<Node> {
        let body = json!({ "targetParentNodeId": target_parent });
        self.http.post(&self.node_url(node, "/copy"), &body).await
    }
}
