//! Reconciliation steps for user lifecycle events.
//!
//! Every step here is safe to re-run: the calling infrastructure may retry a
//! step that was abandoned mid-flight, and the provider may deliver the same
//! event more than once.

use anyhow::Result;
use tracing::{debug, info};

use crate::domains::identity::events::SyncedUser;
use crate::domains::users::models::{User, UserNotificationSettings};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateUserOutcome {
    Created,
    AlreadyExists,
}

/// Idempotent create: at most one row regardless of duplicate deliveries.
///
/// The lookup is a fast path that skips the write for repeat deliveries;
/// correctness under concurrent duplicates rests on the primary-key conflict
/// clause inside the insert. The user row and its notification settings row
/// are written in one transaction so no reader observes a half-created user.
pub async fn create_user(user: &SyncedUser, deps: &ServerDeps) -> Result<CreateUserOutcome> {
    if User::find_by_id(&user.id, &deps.db_pool).await?.is_some() {
        debug!(user_id = %user.id, "User already exists, skipping create");
        return Ok(CreateUserOutcome::AlreadyExists);
    }

    let mut tx = deps.db_pool.begin().await?;

    let inserted = User::insert_if_absent(user, &mut *tx).await?;
    if inserted == 0 {
        // A concurrent delivery won the race between the check and the insert.
        tx.rollback().await?;
        debug!(user_id = %user.id, "Concurrent create won the race, treating as success");
        return Ok(CreateUserOutcome::AlreadyExists);
    }

    UserNotificationSettings::insert_default(&user.id, &mut *tx).await?;

    tx.commit().await?;

    info!(user_id = %user.id, email = %user.email, "User created");
    Ok(CreateUserOutcome::Created)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateUserOutcome {
    Updated,
    Created,
}

/// Overwrite the mutable fields of the user row.
///
/// A missing row is created rather than rejected, so an update delivered
/// before its create never drops provider state. The settings row is
/// materialized alongside for that case.
pub async fn update_user(user: &SyncedUser, deps: &ServerDeps) -> Result<UpdateUserOutcome> {
    let existed = User::find_by_id(&user.id, &deps.db_pool).await?.is_some();

    let mut tx = deps.db_pool.begin().await?;
    User::upsert(user, &mut *tx).await?;
    UserNotificationSettings::insert_default(&user.id, &mut *tx).await?;
    tx.commit().await?;

    if existed {
        info!(user_id = %user.id, "User updated");
        Ok(UpdateUserOutcome::Updated)
    } else {
        info!(user_id = %user.id, "User created by out-of-order update");
        Ok(UpdateUserOutcome::Created)
    }
}

/// Idempotent delete: a missing row is a successful no-op.
///
/// Settings, resume, notification, and application rows cascade at the
/// storage layer.
pub async fn delete_user(id: &str, deps: &ServerDeps) -> Result<bool> {
    let deleted = User::delete(id, &deps.db_pool).await?;
    if deleted == 0 {
        debug!(user_id = %id, "User already absent, nothing to delete");
        return Ok(false);
    }

    info!(user_id = %id, "User deleted");
    Ok(true)
}
