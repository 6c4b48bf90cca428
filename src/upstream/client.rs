use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::error::FetchError;
use crate::models::RawRecord;

/// Anything that can return all rows of a named collection in one read
#[async_trait]
pub trait CollectionSource: Send + Sync {
    async fn fetch_collection(&self, collection: &str) -> Result<Vec<RawRecord>, FetchError>;
}

/// Item store list envelope: `{ "data": [...] }`
#[derive(Debug, Deserialize)]
struct ItemsEnvelope {
    data: Vec<serde_json::Value>,
}

/// HTTP client for the item store (`GET /items/{collection}?limit=-1`)
#[derive(Debug, Clone)]
pub struct ItemStoreClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl ItemStoreClient {
    pub fn new(cfg: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let timeout = Duration::from_secs(cfg.timeout_secs);
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            token: cfg.token.clone().filter(|t| !t.is_empty()),
            timeout,
        })
    }

    fn items_url(&self, collection: &str) -> String {
        format!("{}/items/{}", self.base_url, collection)
    }
}

#[async_trait]
impl CollectionSource for ItemStoreClient {
    async fn fetch_collection(&self, collection: &str) -> Result<Vec<RawRecord>, FetchError> {
        let mut request = self
            .client
            .get(self.items_url(collection))
            .query(&[("limit", "-1")]);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout)
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(FetchError::ServiceUnavailable);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let envelope: ItemsEnvelope = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(envelope.data.into_iter().map(RawRecord::from).collect())
    }
}
