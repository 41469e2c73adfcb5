use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::domains::identity::events::SyncedUser;

/// User - local projection of an identity-provider user
///
/// The id is assigned by the provider and never generated locally.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Find user by ID
    pub async fn find_by_id(id: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert if absent, returning the number of rows written.
    ///
    /// The primary-key conflict clause - not any caller-side existence check -
    /// is what guarantees at most one row when duplicate deliveries race.
    /// Callers must treat zero affected rows as success, not an error.
    pub async fn insert_if_absent(
        user: &SyncedUser,
        executor: impl PgExecutor<'_>,
    ) -> Result<u64> {
        let result = sqlx::query(
            "INSERT INTO users (id, name, email, image_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.image_url)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Overwrite the mutable fields, creating the row when an out-of-order
    /// update arrives before its create.
    pub async fn upsert(user: &SyncedUser, executor: impl PgExecutor<'_>) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO users (id, name, email, image_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE SET
                 name = EXCLUDED.name,
                 email = EXCLUDED.email,
                 image_url = EXCLUDED.image_url,
                 updated_at = EXCLUDED.updated_at
             RETURNING *",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.image_url)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Delete by id. Dependent rows cascade at the storage layer.
    ///
    /// Returns the number of rows removed; deleting an absent user affects
    /// zero rows.
    pub async fn delete(id: &str, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
