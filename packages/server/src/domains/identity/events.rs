//! Identity provider lifecycle events.
//!
//! The provider delivers `{ "type": "...", "data": { ... } }` webhooks for
//! user and organization lifecycle changes. Raw JSON is validated here into
//! typed payloads before any handler logic runs; the reconciliation step
//! never sees partially-validated external data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::impl_restate_serde;

/// Raw webhook envelope. `data` stays untyped until the event type is known.
#[derive(Debug, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: serde_json::Value,
}

/// A typed lifecycle event.
#[derive(Debug, Clone)]
pub enum IdentityEvent {
    UserCreated(UserPayload),
    UserUpdated(UserPayload),
    UserDeleted(DeletedPayload),
    OrganizationCreated(OrganizationPayload),
    OrganizationUpdated(OrganizationPayload),
    OrganizationDeleted(DeletedPayload),
}

impl IdentityEvent {
    /// Parse a raw envelope into a typed event.
    ///
    /// Returns `Ok(None)` for event types this service does not consume.
    pub fn from_envelope(envelope: EventEnvelope) -> Result<Option<Self>, serde_json::Error> {
        let event = match envelope.event_type.as_str() {
            "user.created" => Self::UserCreated(serde_json::from_value(envelope.data)?),
            "user.updated" => Self::UserUpdated(serde_json::from_value(envelope.data)?),
            "user.deleted" => Self::UserDeleted(serde_json::from_value(envelope.data)?),
            "organization.created" => {
                Self::OrganizationCreated(serde_json::from_value(envelope.data)?)
            }
            "organization.updated" => {
                Self::OrganizationUpdated(serde_json::from_value(envelope.data)?)
            }
            "organization.deleted" => {
                Self::OrganizationDeleted(serde_json::from_value(envelope.data)?)
            }
            _ => return Ok(None),
        };
        Ok(Some(event))
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::UserCreated(_) => "user.created",
            Self::UserUpdated(_) => "user.updated",
            Self::UserDeleted(_) => "user.deleted",
            Self::OrganizationCreated(_) => "organization.created",
            Self::OrganizationUpdated(_) => "organization.updated",
            Self::OrganizationDeleted(_) => "organization.deleted",
        }
    }
}

/// Permanent payload rejection.
///
/// Retrying delivery cannot produce a different payload, so these are never
/// retried - they surface as HTTP 400 at the boundary and as terminal
/// failures inside handlers.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("event is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("primary email address `{0}` is not in the email address list")]
    UnknownPrimaryEmail(String),
    #[error("timestamp {0} is out of range")]
    InvalidTimestamp(i64),
}

/// User payload as delivered by the provider. Timestamps are epoch millis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    #[serde(default)]
    pub primary_email_address_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl_restate_serde!(UserPayload);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAddress {
    pub id: String,
    pub email_address: String,
}

/// Organization payload as delivered by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationPayload {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl_restate_serde!(OrganizationPayload);

/// Deletion payload. The provider omits most fields on deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedPayload {
    #[serde(default)]
    pub id: Option<String>,
}

impl_restate_serde!(DeletedPayload);

/// Canonical user record extracted from a validated payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Canonical organization record extracted from a validated payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncedOrganization {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserPayload {
    /// Resolve the canonical fields.
    ///
    /// The primary-email pointer must name an entry of `email_addresses`; a
    /// payload without a resolvable primary email is permanently rejected.
    pub fn into_synced_user(self) -> Result<SyncedUser, ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::MissingField("id"));
        }

        let primary_id = self
            .primary_email_address_id
            .ok_or(ValidationError::MissingField("primary_email_address_id"))?;
        let email = self
            .email_addresses
            .iter()
            .find(|e| e.id == primary_id)
            .map(|e| e.email_address.clone())
            .ok_or(ValidationError::UnknownPrimaryEmail(primary_id))?;

        // Display name falls back to the email when the provider has no name
        // on file.
        let name = match (
            self.first_name.as_deref().unwrap_or("").trim(),
            self.last_name.as_deref().unwrap_or("").trim(),
        ) {
            ("", "") => email.clone(),
            (first, "") => first.to_string(),
            ("", last) => last.to_string(),
            (first, last) => format!("{} {}", first, last),
        };

        Ok(SyncedUser {
            id: self.id,
            name,
            email,
            image_url: self.image_url,
            created_at: timestamp_from_millis(self.created_at)?,
            updated_at: timestamp_from_millis(self.updated_at)?,
        })
    }
}

impl OrganizationPayload {
    pub fn into_synced_organization(self) -> Result<SyncedOrganization, ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::MissingField("id"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }

        Ok(SyncedOrganization {
            id: self.id,
            name: self.name,
            image_url: self.image_url,
            created_at: timestamp_from_millis(self.created_at)?,
            updated_at: timestamp_from_millis(self.updated_at)?,
        })
    }
}

impl DeletedPayload {
    pub fn into_id(self) -> Result<String, ValidationError> {
        match self.id {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(ValidationError::MissingField("id")),
        }
    }
}

fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::from_timestamp_millis(millis).ok_or(ValidationError::InvalidTimestamp(millis))
}
