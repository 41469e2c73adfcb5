//! Organization sync service (stateless)
//!
//! Same shape as the user sync service: validate terminally, reconcile in a
//! durable step, then invalidate cache tags in a second durable step.

use restate_sdk::prelude::*;
use std::sync::Arc;

use crate::domains::identity::events::{DeletedPayload, OrganizationPayload};
use crate::domains::identity::sync::{SyncOutcome, SyncResult};
use crate::domains::organizations::activities::{
    self, CreateOrganizationOutcome, UpdateOrganizationOutcome,
};
use crate::domains::organizations::cache;
use crate::kernel::ServerDeps;

#[restate_sdk::service]
pub trait OrganizationSyncService {
    async fn created(payload: OrganizationPayload) -> Result<SyncResult, HandlerError>;
    async fn updated(payload: OrganizationPayload) -> Result<SyncResult, HandlerError>;
    async fn deleted(payload: DeletedPayload) -> Result<SyncResult, HandlerError>;
}

pub struct OrganizationSyncServiceImpl {
    deps: Arc<ServerDeps>,
}

impl OrganizationSyncServiceImpl {
    pub fn with_deps(deps: Arc<ServerDeps>) -> Self {
        Self { deps }
    }
}

impl OrganizationSyncService for OrganizationSyncServiceImpl {
    async fn created(
        &self,
        ctx: Context<'_>,
        payload: OrganizationPayload,
    ) -> Result<SyncResult, HandlerError> {
        let organization = payload.into_synced_organization().map_err(|e| {
            TerminalError::new(format!("Invalid organization.created payload: {}", e))
        })?;

        tracing::info!(organization_id = %organization.id, "Processing organization.created");

        let result = ctx
            .run(|| async {
                let outcome = activities::create_organization(&organization, &self.deps).await?;
                Ok(SyncResult {
                    id: organization.id.clone(),
                    outcome: match outcome {
                        CreateOrganizationOutcome::Created => SyncOutcome::Created,
                        CreateOrganizationOutcome::AlreadyExists => SyncOutcome::AlreadyExists,
                    },
                })
            })
            .await?;

        let organization_id = result.id.clone();
        ctx.run(|| async {
            cache::revalidate_organization_cache(&self.deps.cache, &organization_id).await?;
            Ok(())
        })
        .await?;

        Ok(result)
    }

    async fn updated(
        &self,
        ctx: Context<'_>,
        payload: OrganizationPayload,
    ) -> Result<SyncResult, HandlerError> {
        let organization = payload.into_synced_organization().map_err(|e| {
            TerminalError::new(format!("Invalid organization.updated payload: {}", e))
        })?;

        tracing::info!(organization_id = %organization.id, "Processing organization.updated");

        let result = ctx
            .run(|| async {
                let outcome = activities::update_organization(&organization, &self.deps).await?;
                Ok(SyncResult {
                    id: organization.id.clone(),
                    outcome: match outcome {
                        UpdateOrganizationOutcome::Updated => SyncOutcome::Updated,
                        UpdateOrganizationOutcome::Created => SyncOutcome::Created,
                    },
                })
            })
            .await?;

        let organization_id = result.id.clone();
        ctx.run(|| async {
            cache::revalidate_organization_cache(&self.deps.cache, &organization_id).await?;
            Ok(())
        })
        .await?;

        Ok(result)
    }

    async fn deleted(
        &self,
        ctx: Context<'_>,
        payload: DeletedPayload,
    ) -> Result<SyncResult, HandlerError> {
        let organization_id = payload.into_id().map_err(|e| {
            TerminalError::new(format!("Invalid organization.deleted payload: {}", e))
        })?;

        tracing::info!(organization_id = %organization_id, "Processing organization.deleted");

        let id = organization_id.clone();
        let outcome = ctx
            .run(|| async { activities::delete_organization(&id, &self.deps).await.map_err(Into::into) })
            .await?;

        ctx.run(|| async {
            cache::revalidate_organization_cache(&self.deps.cache, &organization_id).await?;
            // Settings rows cascaded with the organization; stale each pair.
            for user_id in &outcome.settings_user_ids {
                cache::revalidate_org_user_settings_cache(
                    &self.deps.cache,
                    &organization_id,
                    user_id,
                )
                .await?;
            }
            Ok(())
        })
        .await?;

        Ok(SyncResult {
            id: organization_id,
            outcome: if outcome.deleted {
                SyncOutcome::Deleted
            } else {
                SyncOutcome::NotFound
            },
        })
    }
}
