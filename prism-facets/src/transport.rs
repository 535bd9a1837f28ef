//! Transport seam between the facet layer and the search server

use crate::config::ServerConfig;
use crate::error::FacetError;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Sends a search body and returns the raw response body
#[async_trait]
pub trait Transport: Send + Sync {
    /// `index` of `None` searches every index
    async fn search(&self, index: Option<&str>, body: &Value) -> Result<Value>;

    /// Human-readable transport name
    fn name(&self) -> &str;
}

/// HTTP transport posting to `{url}/{index}/_search`
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let base_url = Url::parse(&config.url)?;
        Self::new(base_url, Duration::from_secs(config.timeout_secs))
    }

    /// Search endpoint for `index`; the index is a single encoded path segment
    pub fn search_url(&self, index: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                FacetError::config(format!("{} cannot be used as a base URL", self.base_url))
            })?;
            segments.pop_if_empty();
            if let Some(index) = index {
                segments.push(index);
            }
            segments.push("_search");
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn search(&self, index: Option<&str>, body: &Value) -> Result<Value> {
        let url = self.search_url(index)?;
        tracing::debug!(%url, "sending search request");

        let response = self.client.post(url).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FacetError::Http { status, body });
        }

        Ok(response.json::<Value>().await?)
    }

    fn name(&self) -> &str {
        "http"
    }
}
