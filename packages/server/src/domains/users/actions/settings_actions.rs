//! Notification settings write paths.

use anyhow::Result;

use crate::domains::users::cache;
use crate::domains::users::models::UserNotificationSettings;
use crate::kernel::ServerDeps;

/// Overwrite the user's notification preferences and stale their cache.
pub async fn upsert_notification_settings(
    user_id: &str,
    new_job_email_notifications: bool,
    ai_prompt: Option<&str>,
    deps: &ServerDeps,
) -> Result<UserNotificationSettings> {
    let settings = UserNotificationSettings::upsert(
        user_id,
        new_job_email_notifications,
        ai_prompt,
        &deps.db_pool,
    )
    .await?;
    cache::revalidate_notification_settings_cache(&deps.cache, user_id).await?;

    Ok(settings)
}
