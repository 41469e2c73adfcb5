//! Resume write paths.

use anyhow::{Context, Result};
use tracing::info;

use crate::domains::users::cache;
use crate::domains::users::models::UserResume;
use crate::kernel::ServerDeps;

/// Store (or replace) the user's resume file and stale its caches.
pub async fn upsert_user_resume(
    user_id: &str,
    resume_file_url: &str,
    deps: &ServerDeps,
) -> Result<UserResume> {
    let resume = UserResume::upsert(user_id, resume_file_url, &deps.db_pool).await?;
    cache::revalidate_resume_cache(&deps.cache, user_id).await?;

    info!(user_id = %user_id, "Resume stored");
    Ok(resume)
}

/// Attach a generated summary to the user's resume.
pub async fn set_resume_ai_summary(
    user_id: &str,
    ai_summary: &str,
    deps: &ServerDeps,
) -> Result<UserResume> {
    let resume = UserResume::set_ai_summary(user_id, ai_summary, &deps.db_pool)
        .await?
        .with_context(|| format!("No resume on file for user {}", user_id))?;
    cache::revalidate_resume_cache(&deps.cache, user_id).await?;

    Ok(resume)
}
