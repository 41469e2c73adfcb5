//! Application setup and server configuration.

use std::time::Duration;

use axum::http::{header::CONTENT_TYPE, Method};
use axum::routing::get;
use axum::Router;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::webhooks::{self, WebhookState};
use crate::server::routes::health_handler;
use crate::workflows_client::WorkflowClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
}

/// Build the Axum application router
///
/// The webhook router carries its own state (signing secret + Restate
/// client); reconciliation itself runs on the workflow server, so the API
/// process only verifies, validates, and dispatches.
pub fn build_app(pool: PgPool, config: &Config) -> Router {
    let webhook_state = WebhookState {
        workflows: WorkflowClient::new(config.restate_ingress_url.clone()),
        signing_secret: config.identity_webhook_secret.clone(),
        tolerance_secs: config.identity_webhook_tolerance_secs,
    };

    let state = AppState { db_pool: pool };

    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
        .merge(webhooks::router(webhook_state))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([CONTENT_TYPE]),
        )
}
