//! Identity provider webhook handler.
//!
//! Receives lifecycle events, verifies the provider's signature, validates
//! the payload shape, and hands the event to the matching durable sync
//! handler. The response code is the retry contract with the provider:
//! - 401/400: permanent rejection (bad signature / malformed payload)
//! - 500: transient dispatch failure, the provider should retry
//! - 200: accepted (or an event type we do not consume)

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domains::identity::events::{EventEnvelope, IdentityEvent};
use crate::workflows_client::WorkflowClient;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_HEADER: &str = "identity-signature";

/// State shared with the webhook handler.
#[derive(Clone)]
pub struct WebhookState {
    pub workflows: WorkflowClient,
    pub signing_secret: String,
    pub tolerance_secs: i64,
}

/// Build the axum router for webhook endpoints.
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/webhooks/identity", post(handle_identity_webhook))
        .with_state(state)
}

/// Handle a lifecycle event from the identity provider.
async fn handle_identity_webhook(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    if let Err(reason) = verify_signature(
        &body,
        &headers,
        &state.signing_secret,
        state.tolerance_secs,
    ) {
        tracing::warn!(reason = %reason, "Rejected identity webhook signature");
        return (StatusCode::UNAUTHORIZED, reason.to_string());
    }

    let envelope: EventEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed identity webhook envelope");
            return (
                StatusCode::BAD_REQUEST,
                format!("Invalid webhook envelope: {}", e),
            );
        }
    };

    let event_type = envelope.event_type.clone();
    let event = match IdentityEvent::from_envelope(envelope) {
        Ok(Some(event)) => event,
        Ok(None) => {
            tracing::debug!(event_type = %event_type, "Ignoring unconsumed event type");
            return (StatusCode::OK, "ignored".to_string());
        }
        Err(e) => {
            // Field-level schema violation. The provider cannot produce a
            // different payload by retrying, so reject permanently.
            tracing::warn!(event_type = %event_type, error = %e, "Malformed identity event payload");
            return (
                StatusCode::BAD_REQUEST,
                format!("Invalid {} payload: {}", event_type, e),
            );
        }
    };

    if let Err(e) = dispatch_event(&state.workflows, &event).await {
        tracing::error!(event_type = %event_type, error = %e, "Failed to dispatch identity event");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "dispatch failed".to_string(),
        );
    }

    tracing::info!(event_type = %event_type, "Identity event dispatched");
    (StatusCode::OK, "accepted".to_string())
}

/// Hand a validated event to its sync handler, fire-and-forget.
async fn dispatch_event(workflows: &WorkflowClient, event: &IdentityEvent) -> anyhow::Result<()> {
    match event {
        IdentityEvent::UserCreated(payload) => {
            workflows.send("UserSyncService", "created", payload).await
        }
        IdentityEvent::UserUpdated(payload) => {
            workflows.send("UserSyncService", "updated", payload).await
        }
        IdentityEvent::UserDeleted(payload) => {
            workflows.send("UserSyncService", "deleted", payload).await
        }
        IdentityEvent::OrganizationCreated(payload) => {
            workflows
                .send("OrganizationSyncService", "created", payload)
                .await
        }
        IdentityEvent::OrganizationUpdated(payload) => {
            workflows
                .send("OrganizationSyncService", "updated", payload)
                .await
        }
        IdentityEvent::OrganizationDeleted(payload) => {
            workflows
                .send("OrganizationSyncService", "deleted", payload)
                .await
        }
    }
}

/// Verify the `identity-signature: t=<millis>,v1=<hex>` header: an
/// HMAC-SHA256 over `<millis>.<body>` with a bounded clock tolerance.
fn verify_signature(
    body: &Bytes,
    headers: &HeaderMap,
    secret: &str,
    tolerance_secs: i64,
) -> Result<(), &'static str> {
    let header = headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or("Missing signature header")?;

    let (timestamp_ms, signature_hex) = parse_signature_header(header)?;

    let now_ms = chrono::Utc::now().timestamp_millis();
    let age_secs = (now_ms - timestamp_ms).abs() / 1000;
    if age_secs > tolerance_secs {
        return Err("Stale signature timestamp");
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| "Failed to initialize HMAC")?;
    mac.update(timestamp_ms.to_string().as_bytes());
    mac.update(b".");
    mac.update(body);

    let expected = hex::decode(signature_hex).map_err(|_| "Invalid signature encoding")?;

    mac.verify_slice(&expected).map_err(|_| "Invalid signature")
}

fn parse_signature_header(header: &str) -> Result<(i64, &str), &'static str> {
    let mut timestamp: Option<i64> = None;
    let mut signature: Option<&str> = None;

    for part in header.split(',') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix("t=") {
            timestamp = value.parse::<i64>().ok();
        } else if let Some(value) = part.strip_prefix("v1=") {
            signature = Some(value);
        }
    }

    let timestamp = timestamp.ok_or("Missing signature timestamp")?;
    let signature = signature.ok_or("Missing signature value")?;

    Ok((timestamp, signature))
}
