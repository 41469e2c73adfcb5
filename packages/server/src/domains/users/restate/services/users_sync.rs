//! User sync service (stateless)
//!
//! Reconciles identity-provider user lifecycle events into local storage,
//! then invalidates the affected cache tags. Each handler processes one
//! event: validate, then one durable reconcile step, then one durable
//! cache-invalidation step. Malformed payloads fail terminally; everything
//! else is retried by the calling infrastructure.

use restate_sdk::prelude::*;
use std::sync::Arc;

use crate::domains::identity::events::{DeletedPayload, UserPayload};
use crate::domains::identity::sync::{SyncOutcome, SyncResult};
use crate::domains::users::activities::{self, CreateUserOutcome, UpdateUserOutcome};
use crate::domains::users::cache;
use crate::kernel::ServerDeps;

#[restate_sdk::service]
pub trait UserSyncService {
    async fn created(payload: UserPayload) -> Result<SyncResult, HandlerError>;
    async fn updated(payload: UserPayload) -> Result<SyncResult, HandlerError>;
    async fn deleted(payload: DeletedPayload) -> Result<SyncResult, HandlerError>;
}

pub struct UserSyncServiceImpl {
    deps: Arc<ServerDeps>,
}

impl UserSyncServiceImpl {
    pub fn with_deps(deps: Arc<ServerDeps>) -> Self {
        Self { deps }
    }
}

impl UserSyncService for UserSyncServiceImpl {
    async fn created(
        &self,
        ctx: Context<'_>,
        payload: UserPayload,
    ) -> Result<SyncResult, HandlerError> {
        // A payload that fails validation is rejected terminally - retrying
        // delivery cannot produce a different payload.
        let user = payload
            .into_synced_user()
            .map_err(|e| TerminalError::new(format!("Invalid user.created payload: {}", e)))?;

        tracing::info!(user_id = %user.id, "Processing user.created");

        let result = ctx
            .run(|| async {
                let outcome = activities::create_user(&user, &self.deps).await?;
                Ok(SyncResult {
                    id: user.id.clone(),
                    outcome: match outcome {
                        CreateUserOutcome::Created => SyncOutcome::Created,
                        CreateUserOutcome::AlreadyExists => SyncOutcome::AlreadyExists,
                    },
                })
            })
            .await?;

        let user_id = result.id.clone();
        ctx.run(|| async {
            cache::revalidate_user_cache(&self.deps.cache, &user_id).await?;
            Ok(())
        })
        .await?;

        Ok(result)
    }

    async fn updated(
        &self,
        ctx: Context<'_>,
        payload: UserPayload,
    ) -> Result<SyncResult, HandlerError> {
        let user = payload
            .into_synced_user()
            .map_err(|e| TerminalError::new(format!("Invalid user.updated payload: {}", e)))?;

        tracing::info!(user_id = %user.id, "Processing user.updated");

        let result = ctx
            .run(|| async {
                let outcome = activities::update_user(&user, &self.deps).await?;
                Ok(SyncResult {
                    id: user.id.clone(),
                    outcome: match outcome {
                        UpdateUserOutcome::Updated => SyncOutcome::Updated,
                        UpdateUserOutcome::Created => SyncOutcome::Created,
                    },
                })
            })
            .await?;

        let user_id = result.id.clone();
        ctx.run(|| async {
            cache::revalidate_user_cache(&self.deps.cache, &user_id).await?;
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
        let user_id = payload
            .into_id()
            .map_err(|e| TerminalError::new(format!("Invalid user.deleted payload: {}", e)))?;

        tracing::info!(user_id = %user_id, "Processing user.deleted");

        let id = user_id.clone();
        let result = ctx
            .run(|| async {
                let removed = activities::delete_user(&id, &self.deps).await?;
                Ok(SyncResult {
                    id: id.clone(),
                    outcome: if removed {
                        SyncOutcome::Deleted
                    } else {
                        SyncOutcome::NotFound
                    },
                })
            })
            .await?;

        ctx.run(|| async {
            // The resume row cascaded with the user, so its tags go stale too.
            cache::revalidate_user_cache(&self.deps.cache, &user_id).await?;
            cache::revalidate_resume_cache(&self.deps.cache, &user_id).await?;
            Ok(())
        })
        .await?;

        Ok(result)
    }
}
