//! HTTP client wrapper for DeepBox API requests.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{DeepboxError, Result};

/// HTTP client for making requests to DeepBox servers.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    token: Option<String>,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with the given request timeout.
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            token: None,
            timeout: request_timeout,
        }
    }

    /// Create a new HTTP client with a proxy.
    pub fn with_proxy(proxy: &str, request_timeout: Duration) -> Result<Self> {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| DeepboxError::InvalidConfig(format!("Invalid proxy: {}", e)))?;

        let client = Client::builder()
            .proxy(proxy)
            .build()
            .map_err(|e| DeepboxError::InvalidConfig(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            token: None,
            timeout: request_timeout,
        })
    }

    /// Set the OAuth bearer token sent with every request.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Clear the bearer token.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// GET a JSON document.
    pub async fn get<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self.send(self.client.get(url).query(query)).await?;
        Ok(response.json().await?)
    }

    /// POST a JSON body and decode the JSON answer.
    pub async fn post<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.client.post(url).json(body)).await?;
        Ok(response.json().await?)
    }

    /// POST a JSON body and ignore the answer.
    pub async fn post_empty<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<()> {
        self.send(self.client.post(url).json(body)).await?;
        Ok(())
    }

    /// PUT a JSON body and ignore the answer.
    pub async fn put<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<()> {
        self.send(self.client.put(url).json(body)).await?;
        Ok(())
    }

    /// DELETE a resource.
    pub async fn delete(&self, url: &str, query: &[(&str, String)]) -> Result<()> {
        self.send(self.client.delete(url).query(query)).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = timeout(self.timeout, request.send())
            .await
            .map_err(|_| DeepboxError::Timeout)??;

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "api response");
        if !status.is_success() {
            return Err(DeepboxError::from_status(status.as_u16()));
        }
        Ok(response)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}
