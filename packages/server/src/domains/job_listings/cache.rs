//! Cache tag fan-out for listings and applications.
//!
//! Listing reads are often organization-scoped ("this employer's listings"),
//! so listing mutations stale the organization-scoped tag as well; the same
//! goes for application reads under a listing.

use uuid::Uuid;

use crate::kernel::{CacheError, CacheKind, CacheTagRegistry};

pub async fn revalidate_job_listing_cache(
    cache: &CacheTagRegistry,
    job_listing_id: Uuid,
    organization_id: &str,
) -> Result<(), CacheError> {
    cache
        .revalidate(
            CacheKind::JobListings,
            &job_listing_id.to_string(),
            Some((CacheKind::Organizations, organization_id)),
        )
        .await
}

/// The application's identity is the joined composite key.
pub async fn revalidate_application_cache(
    cache: &CacheTagRegistry,
    job_listing_id: Uuid,
    user_id: &str,
) -> Result<(), CacheError> {
    let application_id = format!("{}-{}", job_listing_id, user_id);
    let listing_id = job_listing_id.to_string();
    cache
        .revalidate(
            CacheKind::JobListingApplications,
            &application_id,
            Some((CacheKind::JobListings, listing_id.as_str())),
        )
        .await
}
