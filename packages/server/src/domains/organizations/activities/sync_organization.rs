//! Reconciliation steps for organization lifecycle events.
//!
//! Same retry contract as the user steps: every step is safe to re-run.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domains::identity::events::SyncedOrganization;
use crate::domains::organizations::models::{Organization, OrganizationUserSettings};
use crate::impl_restate_serde;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOrganizationOutcome {
    Created,
    AlreadyExists,
}

/// Idempotent create: at most one row regardless of duplicate deliveries.
///
/// The primary-key conflict clause carries the guarantee; zero affected rows
/// means a duplicate delivery (or a concurrent one) got there first.
pub async fn create_organization(
    organization: &SyncedOrganization,
    deps: &ServerDeps,
) -> Result<CreateOrganizationOutcome> {
    if Organization::find_by_id(&organization.id, &deps.db_pool)
        .await?
        .is_some()
    {
        debug!(organization_id = %organization.id, "Organization already exists, skipping create");
        return Ok(CreateOrganizationOutcome::AlreadyExists);
    }

    let inserted = Organization::insert_if_absent(organization, &deps.db_pool).await?;
    if inserted == 0 {
        debug!(
            organization_id = %organization.id,
            "Concurrent create won the race, treating as success"
        );
        return Ok(CreateOrganizationOutcome::AlreadyExists);
    }

    info!(organization_id = %organization.id, name = %organization.name, "Organization created");
    Ok(CreateOrganizationOutcome::Created)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOrganizationOutcome {
    Updated,
    Created,
}

/// Overwrite the mutable fields; a missing row is created rather than
/// rejected so out-of-order deliveries never drop provider state.
pub async fn update_organization(
    organization: &SyncedOrganization,
    deps: &ServerDeps,
) -> Result<UpdateOrganizationOutcome> {
    let existed = Organization::find_by_id(&organization.id, &deps.db_pool)
        .await?
        .is_some();

    Organization::upsert(organization, &deps.db_pool).await?;

    if existed {
        info!(organization_id = %organization.id, "Organization updated");
        Ok(UpdateOrganizationOutcome::Updated)
    } else {
        info!(organization_id = %organization.id, "Organization created by out-of-order update");
        Ok(UpdateOrganizationOutcome::Created)
    }
}

/// What a delete removed, including which settings pairs went with it.
///
/// The user ids are captured before the cascade so the invalidation step can
/// stale each pair's tags afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOrganizationOutcome {
    pub deleted: bool,
    pub settings_user_ids: Vec<String>,
}

impl_restate_serde!(DeleteOrganizationOutcome);

/// Idempotent delete: a missing row is a successful no-op.
pub async fn delete_organization(
    id: &str,
    deps: &ServerDeps,
) -> Result<DeleteOrganizationOutcome> {
    let mut tx = deps.db_pool.begin().await?;

    let settings_user_ids =
        OrganizationUserSettings::user_ids_for_organization(id, &mut *tx).await?;
    let deleted = Organization::delete(id, &mut *tx).await?;

    tx.commit().await?;

    if deleted == 0 {
        debug!(organization_id = %id, "Organization already absent, nothing to delete");
        return Ok(DeleteOrganizationOutcome {
            deleted: false,
            settings_user_ids: Vec::new(),
        });
    }

    info!(
        organization_id = %id,
        settings_rows = settings_user_ids.len(),
        "Organization deleted"
    );
    Ok(DeleteOrganizationOutcome {
        deleted: true,
        settings_user_ids,
    })
}
