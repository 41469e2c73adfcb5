//! Cache tag fan-out for user-owned rows.

use crate::kernel::{CacheError, CacheKind, CacheTagRegistry};

/// A user mutation stales both the user row and its settings row caches,
/// since the two are created and deleted together.
pub async fn revalidate_user_cache(
    cache: &CacheTagRegistry,
    user_id: &str,
) -> Result<(), CacheError> {
    cache.revalidate(CacheKind::Users, user_id, None).await?;
    cache
        .revalidate(CacheKind::UserNotificationSettings, user_id, None)
        .await
}

pub async fn revalidate_notification_settings_cache(
    cache: &CacheTagRegistry,
    user_id: &str,
) -> Result<(), CacheError> {
    cache
        .revalidate(CacheKind::UserNotificationSettings, user_id, None)
        .await
}

pub async fn revalidate_resume_cache(
    cache: &CacheTagRegistry,
    user_id: &str,
) -> Result<(), CacheError> {
    cache.revalidate(CacheKind::UserResumes, user_id, None).await
}

/// Notifications are read per-user, so the user is the parent scope.
pub async fn revalidate_user_notifications_cache(
    cache: &CacheTagRegistry,
    notification_id: &str,
    user_id: &str,
) -> Result<(), CacheError> {
    cache
        .revalidate(
            CacheKind::UserNotifications,
            notification_id,
            Some((CacheKind::Users, user_id)),
        )
        .await
}
