// Test doubles for kernel dependencies.
//
// Kept in the library (not behind cfg(test)) so the integration test
// harness in tests/ can reach them.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::cache::FreshnessProfile;
use super::deps::ServerDeps;
use super::traits::BaseTagStore;

/// Records every staleness signal for assertions.
#[derive(Default)]
pub struct RecordingTagStore {
    tags: Mutex<Vec<String>>,
}

impl RecordingTagStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// All tags signaled so far, in order.
    pub async fn recorded(&self) -> Vec<String> {
        self.tags.lock().await.clone()
    }

    pub async fn clear(&self) {
        self.tags.lock().await.clear();
    }
}

#[async_trait]
impl BaseTagStore for RecordingTagStore {
    async fn mark_stale(&self, tag: &str, _freshness: Option<FreshnessProfile>) -> Result<()> {
        self.tags.lock().await.push(tag.to_string());
        Ok(())
    }
}

/// Fails every signal - for asserting invalidation stays best-effort.
pub struct FailingTagStore;

#[async_trait]
impl BaseTagStore for FailingTagStore {
    async fn mark_stale(&self, _tag: &str, _freshness: Option<FreshnessProfile>) -> Result<()> {
        anyhow::bail!("tag store unavailable")
    }
}

impl ServerDeps {
    /// Deps wired to a recording tag store.
    pub fn for_tests(db_pool: sqlx::PgPool) -> (Self, Arc<RecordingTagStore>) {
        let store = RecordingTagStore::new();
        (Self::new(db_pool, store.clone()), store)
    }
}
