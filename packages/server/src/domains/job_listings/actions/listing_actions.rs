//! Listing write paths.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domains::job_listings::cache;
use crate::domains::job_listings::models::{JobListing, JobListingStatus};
use crate::kernel::ServerDeps;

pub struct NewJobListing {
    pub organization_id: String,
    pub title: String,
    pub description: String,
}

/// Create a draft listing for an organization.
pub async fn create_job_listing(input: NewJobListing, deps: &ServerDeps) -> Result<JobListing> {
    let listing = JobListing {
        id: Uuid::new_v4(),
        organization_id: input.organization_id,
        title: input.title,
        description: input.description,
        status: JobListingStatus::Draft.as_str().to_string(),
        posted_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let created = listing.insert(&deps.db_pool).await?;
    cache::revalidate_job_listing_cache(&deps.cache, created.id, &created.organization_id).await?;

    info!(
        job_listing_id = %created.id,
        organization_id = %created.organization_id,
        "Job listing created"
    );
    Ok(created)
}

/// Rewrite a listing's title and description.
pub async fn update_job_listing(
    id: Uuid,
    title: &str,
    description: &str,
    deps: &ServerDeps,
) -> Result<JobListing> {
    let listing = JobListing::update_content(id, title, description, &deps.db_pool)
        .await?
        .with_context(|| format!("Job listing {} not found", id))?;
    cache::revalidate_job_listing_cache(&deps.cache, listing.id, &listing.organization_id).await?;

    Ok(listing)
}

/// Move a listing between draft, published, and delisted.
pub async fn update_job_listing_status(
    id: Uuid,
    status: JobListingStatus,
    deps: &ServerDeps,
) -> Result<JobListing> {
    let listing = JobListing::update_status(id, status, &deps.db_pool)
        .await?
        .with_context(|| format!("Job listing {} not found", id))?;
    cache::revalidate_job_listing_cache(&deps.cache, listing.id, &listing.organization_id).await?;

    info!(
        job_listing_id = %listing.id,
        status = %listing.status,
        "Job listing status changed"
    );
    Ok(listing)
}

/// Remove a listing. Applications and notifications cascade.
pub async fn delete_job_listing(id: Uuid, deps: &ServerDeps) -> Result<bool> {
    // Capture the owner before the row disappears; the scoped tag needs it.
    let Some(listing) = JobListing::find_by_id(id, &deps.db_pool).await? else {
        return Ok(false);
    };

    let deleted = JobListing::delete(id, &deps.db_pool).await?;
    if deleted > 0 {
        cache::revalidate_job_listing_cache(&deps.cache, id, &listing.organization_id).await?;
        info!(job_listing_id = %id, "Job listing deleted");
    }

    Ok(deleted > 0)
}
