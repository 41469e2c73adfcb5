use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::domains::identity::events::SyncedOrganization;

/// Organization - local projection of an identity-provider organization
///
/// The id is assigned by the provider and never generated locally.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Find organization by ID
    pub async fn find_by_id(id: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM organizations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert if absent, returning the number of rows written.
    ///
    /// Same contract as the user insert: the primary-key conflict clause is
    /// the duplicate-delivery guarantee, and zero affected rows is success.
    pub async fn insert_if_absent(
        organization: &SyncedOrganization,
        executor: impl PgExecutor<'_>,
    ) -> Result<u64> {
        let result = sqlx::query(
            "INSERT INTO organizations (id, name, image_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&organization.id)
        .bind(&organization.name)
        .bind(&organization.image_url)
        .bind(organization.created_at)
        .bind(organization.updated_at)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Overwrite the mutable fields, creating the row when an out-of-order
    /// update arrives before its create.
    pub async fn upsert(
        organization: &SyncedOrganization,
        executor: impl PgExecutor<'_>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO organizations (id, name, image_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
                 name = EXCLUDED.name,
                 image_url = EXCLUDED.image_url,
                 updated_at = EXCLUDED.updated_at
             RETURNING *",
        )
        .bind(&organization.id)
        .bind(&organization.name)
        .bind(&organization.image_url)
        .bind(organization.created_at)
        .bind(organization.updated_at)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Delete by id. Listings and settings rows cascade at the storage layer.
    pub async fn delete(id: &str, executor: impl PgExecutor<'_>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
