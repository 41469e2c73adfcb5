//! Server dependencies for domain activities (using traits for testability)
//!
//! This module provides the central dependency container handed to all
//! domain activities and write-path actions. The tag store behind the cache
//! registry is a trait abstraction so tests can substitute a recording one.

use std::sync::Arc;

use sqlx::PgPool;

use super::cache::CacheTagRegistry;
use super::traits::BaseTagStore;

/// Server dependencies accessible to activities and actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Cache invalidation fan-out over the injected tag store.
    pub cache: CacheTagRegistry,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(db_pool: PgPool, tag_store: Arc<dyn BaseTagStore>) -> Self {
        Self {
            db_pool,
            cache: CacheTagRegistry::new(tag_store),
        }
    }
}
