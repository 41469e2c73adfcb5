//! Employer notification settings write paths.

use anyhow::Result;

use crate::domains::organizations::cache;
use crate::domains::organizations::models::OrganizationUserSettings;
use crate::kernel::ServerDeps;

/// Overwrite one (organization, user) pair's preferences and stale its cache.
pub async fn upsert_organization_user_settings(
    organization_id: &str,
    user_id: &str,
    new_application_email_notifications: bool,
    minimum_rating: Option<i32>,
    deps: &ServerDeps,
) -> Result<OrganizationUserSettings> {
    let settings = OrganizationUserSettings::upsert(
        organization_id,
        user_id,
        new_application_email_notifications,
        minimum_rating,
        &deps.db_pool,
    )
    .await?;
    cache::revalidate_org_user_settings_cache(&deps.cache, organization_id, user_id).await?;

    Ok(settings)
}
