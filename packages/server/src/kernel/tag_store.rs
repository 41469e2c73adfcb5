//! HTTP tag store - pushes staleness signals to the response cache's purge endpoint.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;

use super::cache::FreshnessProfile;
use super::traits::BaseTagStore;

/// Tag store backed by an HTTP response cache with a purge endpoint.
#[derive(Clone)]
pub struct HttpTagStore {
    purge_url: String,
    http_client: Arc<reqwest::Client>,
}

#[derive(Serialize)]
struct PurgeRequest<'a> {
    tag: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    freshness: Option<FreshnessProfile>,
}

impl HttpTagStore {
    pub fn new(purge_url: impl Into<String>) -> Self {
        Self {
            purge_url: purge_url.into(),
            http_client: Arc::new(reqwest::Client::new()),
        }
    }
}

#[async_trait]
impl BaseTagStore for HttpTagStore {
    async fn mark_stale(&self, tag: &str, freshness: Option<FreshnessProfile>) -> Result<()> {
        let response = self
            .http_client
            .post(&self.purge_url)
            .json(&PurgeRequest { tag, freshness })
            .send()
            .await
            .context("Failed to send cache purge request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            anyhow::bail!("Cache purge failed ({}): {}", status, body);
        }

        Ok(())
    }
}
