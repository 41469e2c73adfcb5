//! Restate sync-service client
//!
//! Simple HTTP client for invoking Restate service handlers through the
//! ingress, used by the webhook route to hand events off to the durable
//! sync services.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Client for invoking Restate handlers via HTTP
#[derive(Clone)]
pub struct WorkflowClient {
    base_url: String,
    http_client: Arc<reqwest::Client>,
}

impl WorkflowClient {
    /// Create a new client pointed at the Restate ingress
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: Arc::new(reqwest::Client::new()),
        }
    }

    /// Invoke a service handler and wait for its result
    ///
    /// # Arguments
    /// * `service_name` - Name of the service (e.g., "UserSyncService")
    /// * `handler_name` - Name of the handler method (e.g., "created")
    /// * `request` - Request payload
    pub async fn invoke<Req, Res>(
        &self,
        service_name: &str,
        handler_name: &str,
        request: &Req,
    ) -> Result<Res>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let url = format!("{}/{}/{}", self.base_url, service_name, handler_name);

        tracing::debug!(
            service = service_name,
            handler = handler_name,
            url = %url,
            "Invoking Restate handler"
        );

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to send handler request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            anyhow::bail!("Handler invocation failed ({}): {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to deserialize handler response")
    }

    /// Invoke a service handler without waiting for completion (fire-and-forget)
    pub async fn send<Req>(
        &self,
        service_name: &str,
        handler_name: &str,
        request: &Req,
    ) -> Result<()>
    where
        Req: Serialize,
    {
        let url = format!("{}/{}/{}/send", self.base_url, service_name, handler_name);

        tracing::debug!(
            service = service_name,
            handler = handler_name,
            url = %url,
            "Dispatching to Restate handler (async)"
        );

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to dispatch to handler")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            anyhow::bail!("Failed to dispatch to handler ({}): {}", status, body);
        }

        Ok(())
    }
}
