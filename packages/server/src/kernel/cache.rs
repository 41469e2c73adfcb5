//! Tag-based cache invalidation.
//!
//! Every cached read files itself under one or more string tags; write paths
//! call [`CacheTagRegistry::revalidate`] after mutating a row to mark those
//! tags stale. Tags are namespaced by entity kind, so overlapping reads
//! ("all published listings" vs "listing #42") invalidate independently
//! without touching unrelated kinds.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::traits::BaseTagStore;

/// The closed set of cacheable entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    Users,
    Organizations,
    JobListings,
    JobListingApplications,
    UserNotifications,
    UserResumes,
    UserNotificationSettings,
    OrganizationUserSettings,
}

impl CacheKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Organizations => "organizations",
            Self::JobListings => "jobListings",
            Self::JobListingApplications => "jobListingApplications",
            Self::UserNotifications => "userNotifications",
            Self::UserResumes => "userResumes",
            Self::UserNotificationSettings => "userNotificationSettings",
            Self::OrganizationUserSettings => "organizationUserSettings",
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A derived invalidation key.
///
/// Tags are generated and handed to the store, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheTag(String);

impl CacheTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// How aggressively the cache should treat entries under a tag going forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FreshnessProfile {
    Seconds,
    Minutes,
    Hours,
    Days,
    Max,
}

/// Tag covering every row of `kind`.
pub fn global_tag(kind: CacheKind) -> CacheTag {
    CacheTag(format!("global:{}", kind.as_str()))
}

/// Tag covering exactly one row of `kind`.
pub fn id_tag(kind: CacheKind, id: &str) -> Result<CacheTag, CacheError> {
    if id.is_empty() {
        return Err(CacheError::InvalidArgument("id must not be empty"));
    }
    Ok(CacheTag(format!("id:{}-{}", kind.as_str(), id)))
}

/// Tag covering the rows of `kind` owned by one parent row.
///
/// An empty parent id would collapse distinct scopes into one tag, so it is
/// rejected like an empty id.
pub fn scoped_tag(
    kind: CacheKind,
    parent_kind: CacheKind,
    parent_id: &str,
) -> Result<CacheTag, CacheError> {
    if parent_id.is_empty() {
        return Err(CacheError::InvalidArgument("parent id must not be empty"));
    }
    Ok(CacheTag(format!(
        "{}:{}-{}",
        parent_kind.as_str(),
        parent_id,
        kind.as_str()
    )))
}

/// Fan-out invalidation over an injected tag store.
#[derive(Clone)]
pub struct CacheTagRegistry {
    store: Arc<dyn BaseTagStore>,
}

impl CacheTagRegistry {
    pub fn new(store: Arc<dyn BaseTagStore>) -> Self {
        Self { store }
    }

    /// Mark stale, in order: the kind's global tag, the row's id tag, and the
    /// parent-scoped tag when a parent is given.
    ///
    /// Repeating a call is harmless; marking an already-stale tag changes
    /// nothing. A store failure is logged and swallowed - a missed signal
    /// degrades freshness until the cache's own expiry, not correctness.
    pub async fn revalidate(
        &self,
        kind: CacheKind,
        id: &str,
        parent: Option<(CacheKind, &str)>,
    ) -> Result<(), CacheError> {
        let mut tags = vec![global_tag(kind), id_tag(kind, id)?];
        if let Some((parent_kind, parent_id)) = parent {
            tags.push(scoped_tag(kind, parent_kind, parent_id)?);
        }

        for tag in &tags {
            if let Err(e) = self.store.mark_stale(tag.as_str(), None).await {
                tracing::warn!(tag = %tag, error = %e, "Failed to signal cache staleness");
            }
        }

        Ok(())
    }
}
