use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Resume on file for a job seeker - one row per user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserResume {
    pub user_id: String,
    pub resume_file_url: String,
    /// Markdown summary generated after upload
    pub ai_summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResume {
    /// Find resume by user ID
    pub async fn find_by_user_id(user_id: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM user_resumes WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Replace the user's resume file. A re-upload clears the stale summary.
    pub async fn upsert(user_id: &str, resume_file_url: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO user_resumes (user_id, resume_file_url)
             VALUES ($1, $2)
             ON CONFLICT (user_id) DO UPDATE SET
                 resume_file_url = EXCLUDED.resume_file_url,
                 ai_summary = NULL,
                 updated_at = NOW()
             RETURNING *",
        )
        .bind(user_id)
        .bind(resume_file_url)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Attach the generated summary to an existing resume.
    pub async fn set_ai_summary(
        user_id: &str,
        ai_summary: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE user_resumes
             SET ai_summary = $2, updated_at = NOW()
             WHERE user_id = $1
             RETURNING *",
        )
        .bind(user_id)
        .bind(ai_summary)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}
