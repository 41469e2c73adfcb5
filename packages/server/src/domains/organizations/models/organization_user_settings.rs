use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

/// Per (organization, user) notification preferences for employers
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrganizationUserSettings {
    pub organization_id: String,
    pub user_id: String,
    pub new_application_email_notifications: bool,
    /// Only applications rated at or above this are worth an email
    pub minimum_rating: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrganizationUserSettings {
    /// Find settings for one (organization, user) pair
    pub async fn find(
        organization_id: &str,
        user_id: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM organization_user_settings
             WHERE organization_id = $1 AND user_id = $2",
        )
        .bind(organization_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// User ids holding settings rows under an organization.
    pub async fn user_ids_for_organization(
        organization_id: &str,
        executor: impl PgExecutor<'_>,
    ) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT user_id FROM organization_user_settings WHERE organization_id = $1",
        )
        .bind(organization_id)
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Overwrite the pair's preferences, creating the row if needed.
    pub async fn upsert(
        organization_id: &str,
        user_id: &str,
        new_application_email_notifications: bool,
        minimum_rating: Option<i32>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO organization_user_settings
                 (organization_id, user_id, new_application_email_notifications, minimum_rating)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (organization_id, user_id) DO UPDATE SET
                 new_application_email_notifications = EXCLUDED.new_application_email_notifications,
                 minimum_rating = EXCLUDED.minimum_rating,
                 updated_at = NOW()
             RETURNING *",
        )
        .bind(organization_id)
        .bind(user_id)
        .bind(new_application_email_notifications)
        .bind(minimum_rating)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
