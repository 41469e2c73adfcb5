//! Kernel module - server infrastructure and dependencies.

pub mod cache;
pub mod deps;
pub mod tag_store;
pub mod test_dependencies;
pub mod traits;

pub use cache::{
    global_tag, id_tag, scoped_tag, CacheError, CacheKind, CacheTag, CacheTagRegistry,
    FreshnessProfile,
};
pub use deps::ServerDeps;
pub use tag_store::HttpTagStore;
pub use test_dependencies::{FailingTagStore, RecordingTagStore};
pub use traits::{BaseTagStore, NoopTagStore};
