use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Notification record - tracks that a user was alerted about a new listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserNotification {
    pub id: Uuid,
    pub user_id: String,
    pub job_listing_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl UserNotification {
    /// Record a notification, returning the new row if one was written.
    ///
    /// Uses ON CONFLICT DO NOTHING to prevent duplicate alerts for the same
    /// listing-user pair; a suppressed duplicate returns `None`.
    pub async fn record(
        user_id: &str,
        job_listing_id: Uuid,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO user_notifications (user_id, job_listing_id)
             VALUES ($1, $2)
             ON CONFLICT (user_id, job_listing_id) DO NOTHING
             RETURNING *",
        )
        .bind(user_id)
        .bind(job_listing_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Find all notifications for a user, newest first
    pub async fn find_by_user(user_id: &str, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM user_notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
