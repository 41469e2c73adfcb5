//! Cache tag fan-out for organization-owned rows.

use crate::kernel::{CacheError, CacheKind, CacheTagRegistry};

pub async fn revalidate_organization_cache(
    cache: &CacheTagRegistry,
    organization_id: &str,
) -> Result<(), CacheError> {
    cache
        .revalidate(CacheKind::Organizations, organization_id, None)
        .await
}

/// Settings pairs are read per organization, so the organization is the
/// parent scope. The pair's identity is the joined composite key.
pub async fn revalidate_org_user_settings_cache(
    cache: &CacheTagRegistry,
    organization_id: &str,
    user_id: &str,
) -> Result<(), CacheError> {
    let settings_id = format!("{}-{}", organization_id, user_id);
    cache
        .revalidate(
            CacheKind::OrganizationUserSettings,
            &settings_id,
            Some((CacheKind::Organizations, organization_id)),
        )
        .await
}
