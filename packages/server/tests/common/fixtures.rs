//! Test fixtures for creating test data.

use anyhow::Result;
use sqlx::PgPool;

use server_core::domains::identity::events::{
    DeletedPayload, EmailAddress, OrganizationPayload, UserPayload,
};

pub const T0_MILLIS: i64 = 1704067200000; // 2024-01-01T00:00:00Z

/// Provider-shaped user payload with a resolvable primary email.
pub fn user_payload(id: &str, email: &str) -> UserPayload {
    UserPayload {
        id: id.to_string(),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        image_url: Some(format!("https://img.example/{}.png", id)),
        email_addresses: vec![EmailAddress {
            id: "email_primary".to_string(),
            email_address: email.to_string(),
        }],
        primary_email_address_id: Some("email_primary".to_string()),
        created_at: T0_MILLIS,
        updated_at: T0_MILLIS,
    }
}

/// Provider-shaped organization payload.
pub fn organization_payload(id: &str, name: &str) -> OrganizationPayload {
    OrganizationPayload {
        id: id.to_string(),
        name: name.to_string(),
        image_url: None,
        created_at: T0_MILLIS,
        updated_at: T0_MILLIS,
    }
}

pub fn deleted_payload(id: &str) -> DeletedPayload {
    DeletedPayload {
        id: Some(id.to_string()),
    }
}

/// Count rows in `users` for one id.
pub async fn count_users(id: &str, pool: &PgPool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Count rows in `user_notification_settings` for one user id.
pub async fn count_notification_settings(user_id: &str, pool: &PgPool) -> Result<i64> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM user_notification_settings WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Count rows in `organizations` for one id.
pub async fn count_organizations(id: &str, pool: &PgPool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM organizations WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
