use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

/// Notification preferences for a job seeker - one row per user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserNotificationSettings {
    pub user_id: String,
    pub new_job_email_notifications: bool,
    /// Free-text prompt describing which listings the user wants to hear about
    pub ai_prompt: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserNotificationSettings {
    /// Find settings by user ID
    pub async fn find_by_user_id(user_id: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM user_notification_settings WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Create the default settings row for a user. No-op if one already exists.
    pub async fn insert_default(user_id: &str, executor: impl PgExecutor<'_>) -> Result<u64> {
        let result = sqlx::query(
            "INSERT INTO user_notification_settings (user_id)
             VALUES ($1)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Overwrite the user's preferences, creating the row if needed.
    pub async fn upsert(
        user_id: &str,
        new_job_email_notifications: bool,
        ai_prompt: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO user_notification_settings
                 (user_id, new_job_email_notifications, ai_prompt)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO UPDATE SET
                 new_job_email_notifications = EXCLUDED.new_job_email_notifications,
                 ai_prompt = EXCLUDED.ai_prompt,
                 updated_at = NOW()
             RETURNING *",
        )
        .bind(user_id)
        .bind(new_job_email_notifications)
        .bind(ai_prompt)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
