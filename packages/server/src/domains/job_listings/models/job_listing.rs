use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Job listing posted by an employer organization
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobListing {
    pub id: Uuid,
    pub organization_id: String,
    pub title: String,
    pub description: String,
    pub status: String, // 'draft' | 'published' | 'delisted'
    /// Set the first time the listing is published; kept across delist cycles
    pub posted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Status enum for type-safe transitions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobListingStatus {
    Draft,
    Published,
    Delisted,
}

impl JobListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Delisted => "delisted",
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl JobListing {
    /// Find listing by ID
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM job_listings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find all listings for an organization, newest first
    pub async fn find_by_organization(organization_id: &str, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM job_listings WHERE organization_id = $1 ORDER BY created_at DESC",
        )
        .bind(organization_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Find published listings across all organizations
    pub async fn find_published(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM job_listings WHERE status = 'published' ORDER BY posted_at DESC",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert new listing
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO job_listings (id, organization_id, title, description, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.organization_id)
        .bind(&self.title)
        .bind(&self.description)
        .bind(&self.status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Update title and description
    pub async fn update_content(
        id: Uuid,
        title: &str,
        description: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE job_listings
             SET title = $2, description = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Update listing status. The first transition to published stamps
    /// posted_at; later cycles keep the original timestamp.
    pub async fn update_status(
        id: Uuid,
        status: JobListingStatus,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE job_listings
             SET status = $2,
                 posted_at = CASE
                     WHEN $2 = 'published' THEN COALESCE(posted_at, NOW())
                     ELSE posted_at
                 END,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete listing by id, returning affected rows
    pub async fn delete(id: Uuid, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM job_listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
