//! Users domain - job seekers mirrored from the identity provider
//!
//! Architecture (Restate services):
//!   webhook ingress → workflow_client.send(UserSyncService) → handler
//!   validates, reconciles via activities, then invalidates cache tags

pub mod actions;
pub mod activities;
pub mod cache;
pub mod models;
pub mod restate;

// Re-export commonly used types
pub use models::user::User;
pub use restate::*;
