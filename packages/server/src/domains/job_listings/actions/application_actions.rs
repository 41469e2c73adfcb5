//! Application write paths.

use anyhow::{Context, Result};
use tracing::info;
use uuid::Uuid;

use crate::domains::job_listings::cache;
use crate::domains::job_listings::models::{ApplicationStage, JobListingApplication};
use crate::kernel::ServerDeps;

/// File an application against a listing.
///
/// Applying twice returns the existing application unchanged.
pub async fn apply_to_job_listing(
    job_listing_id: Uuid,
    user_id: &str,
    cover_letter: Option<&str>,
    deps: &ServerDeps,
) -> Result<JobListingApplication> {
    match JobListingApplication::insert_if_absent(
        job_listing_id,
        user_id,
        cover_letter,
        &deps.db_pool,
    )
    .await?
    {
        Some(application) => {
            cache::revalidate_application_cache(&deps.cache, job_listing_id, user_id).await?;
            info!(
                job_listing_id = %job_listing_id,
                user_id = %user_id,
                "Application filed"
            );
            Ok(application)
        }
        None => JobListingApplication::find(job_listing_id, user_id, &deps.db_pool)
            .await?
            .with_context(|| {
                format!(
                    "Application for listing {} by user {} vanished mid-apply",
                    job_listing_id, user_id
                )
            }),
    }
}

/// Move an application through the hiring pipeline.
pub async fn update_application_stage(
    job_listing_id: Uuid,
    user_id: &str,
    stage: ApplicationStage,
    deps: &ServerDeps,
) -> Result<JobListingApplication> {
    let application =
        JobListingApplication::update_stage(job_listing_id, user_id, stage, &deps.db_pool)
            .await?
            .with_context(|| {
                format!(
                    "No application for listing {} by user {}",
                    job_listing_id, user_id
                )
            })?;
    cache::revalidate_application_cache(&deps.cache, job_listing_id, user_id).await?;

    Ok(application)
}

/// Set the employer's rating for an application.
pub async fn update_application_rating(
    job_listing_id: Uuid,
    user_id: &str,
    rating: i32,
    deps: &ServerDeps,
) -> Result<JobListingApplication> {
    let application =
        JobListingApplication::update_rating(job_listing_id, user_id, rating, &deps.db_pool)
            .await?
            .with_context(|| {
                format!(
                    "No application for listing {} by user {}",
                    job_listing_id, user_id
                )
            })?;
    cache::revalidate_application_cache(&deps.cache, job_listing_id, user_id).await?;

    Ok(application)
}
