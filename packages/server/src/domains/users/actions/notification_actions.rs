//! New-job alert recording.

use anyhow::Result;
use tracing::info;
use uuid::Uuid;

use crate::domains::users::cache;
use crate::domains::users::models::UserNotification;
use crate::kernel::ServerDeps;

/// Record a new-job alert for each user, returning how many were written.
///
/// Duplicate (user, listing) pairs are suppressed by the storage layer, so
/// re-running a notification batch never double-alerts anyone.
pub async fn record_new_job_notifications(
    job_listing_id: Uuid,
    user_ids: &[String],
    deps: &ServerDeps,
) -> Result<u32> {
    let mut recorded = 0u32;

    for user_id in user_ids {
        if let Some(notification) =
            UserNotification::record(user_id, job_listing_id, &deps.db_pool).await?
        {
            recorded += 1;
            cache::revalidate_user_notifications_cache(
                &deps.cache,
                &notification.id.to_string(),
                user_id,
            )
            .await?;
        }
    }

    info!(
        job_listing_id = %job_listing_id,
        notified = recorded,
        skipped = user_ids.len() as u32 - recorded,
        "Recorded new-job notifications"
    );

    Ok(recorded)
}
