//! Restate Workflow Server
//!
//! This binary runs the Restate HTTP endpoint hosting the durable sync
//! services. The API server dispatches identity events here through the
//! Restate ingress; Restate retries any step that does not complete.

use std::sync::Arc;

use anyhow::{Context, Result};
use restate_sdk::prelude::*;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use server_core::domains::organizations::{OrganizationSyncService, OrganizationSyncServiceImpl};
use server_core::domains::users::{UserSyncService, UserSyncServiceImpl};
use server_core::kernel::{BaseTagStore, HttpTagStore, NoopTagStore, ServerDeps};
use server_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,restate_sdk=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Restate Workflow Server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Connect to database (schema migrations are run by the API server)
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    let tag_store: Arc<dyn BaseTagStore> = match &config.cache_purge_url {
        Some(url) => Arc::new(HttpTagStore::new(url.clone())),
        None => {
            tracing::warn!("CACHE_PURGE_URL not set, staleness signals will be dropped");
            Arc::new(NoopTagStore)
        }
    };
    let deps = Arc::new(ServerDeps::new(pool, tag_store));

    // Get port from environment or use default
    let port = std::env::var("WORKFLOW_SERVER_PORT")
        .unwrap_or_else(|_| "9080".to_string())
        .parse::<u16>()
        .context("Invalid WORKFLOW_SERVER_PORT")?;

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Workflow server listening on {}", addr);

    // Build Restate endpoint with the sync services
    let endpoint = Endpoint::builder()
        .bind(UserSyncServiceImpl::with_deps(deps.clone()).serve())
        .bind(OrganizationSyncServiceImpl::with_deps(deps).serve())
        .build();

    // Start HTTP server
    HttpServer::new(endpoint)
        .listen_and_serve(addr.parse()?)
        .await;

    Ok(())
}
