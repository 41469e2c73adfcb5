// Trait definitions for dependency injection

use anyhow::Result;
use async_trait::async_trait;

use super::cache::FreshnessProfile;

/// Staleness signal sink for cache tags.
///
/// The response cache that observes tags lives outside this process; write
/// paths only compute which tags to stale and push the signal through this
/// trait. Implementations must tolerate repeated signals for the same tag.
#[async_trait]
pub trait BaseTagStore: Send + Sync {
    /// Mark every cached entry filed under `tag` as stale.
    ///
    /// The optional freshness profile tells the cache how aggressively to
    /// treat entries under this tag going forward.
    async fn mark_stale(&self, tag: &str, freshness: Option<FreshnessProfile>) -> Result<()>;
}

/// Tag store for deployments without a response cache. Signals are dropped.
pub struct NoopTagStore;

#[async_trait]
impl BaseTagStore for NoopTagStore {
    async fn mark_stale(&self, _tag: &str, _freshness: Option<FreshnessProfile>) -> Result<()> {
        Ok(())
    }
}
