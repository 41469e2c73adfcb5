use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Application filed by a job seeker - one per (listing, user) pair
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobListingApplication {
    pub job_listing_id: Uuid,
    pub user_id: String,
    pub cover_letter: Option<String>,
    /// Employer rating, 1-5
    pub rating: Option<i32>,
    pub stage: String, // 'applied' | 'interested' | 'interviewed' | 'hired' | 'denied'
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Hiring pipeline stage for type-safe transitions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStage {
    Applied,
    Interested,
    Interviewed,
    Hired,
    Denied,
}

impl ApplicationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Interested => "interested",
            Self::Interviewed => "interviewed",
            Self::Hired => "hired",
            Self::Denied => "denied",
        }
    }
}

impl JobListingApplication {
    /// Find one application by its composite key
    pub async fn find(
        job_listing_id: Uuid,
        user_id: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM job_listing_applications
             WHERE job_listing_id = $1 AND user_id = $2",
        )
        .bind(job_listing_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Find all applications against a listing, newest first
    pub async fn find_by_listing(job_listing_id: Uuid, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM job_listing_applications
             WHERE job_listing_id = $1 ORDER BY created_at DESC",
        )
        .bind(job_listing_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// File an application. Applying twice is a no-op, not an error.
    pub async fn insert_if_absent(
        job_listing_id: Uuid,
        user_id: &str,
        cover_letter: Option<&str>,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO job_listing_applications (job_listing_id, user_id, cover_letter)
             VALUES ($1, $2, $3)
             ON CONFLICT (job_listing_id, user_id) DO NOTHING
             RETURNING *",
        )
        .bind(job_listing_id)
        .bind(user_id)
        .bind(cover_letter)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Move an application through the hiring pipeline
    pub async fn update_stage(
        job_listing_id: Uuid,
        user_id: &str,
        stage: ApplicationStage,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE job_listing_applications
             SET stage = $3, updated_at = NOW()
             WHERE job_listing_id = $1 AND user_id = $2
             RETURNING *",
        )
        .bind(job_listing_id)
        .bind(user_id)
        .bind(stage.as_str())
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Set the employer's rating for an application
    pub async fn update_rating(
        job_listing_id: Uuid,
        user_id: &str,
        rating: i32,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE job_listing_applications
             SET rating = $3, updated_at = NOW()
             WHERE job_listing_id = $1 AND user_id = $2
             RETURNING *",
        )
        .bind(job_listing_id)
        .bind(user_id)
        .bind(rating)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}
