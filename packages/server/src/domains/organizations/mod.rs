//! Organizations domain - employers mirrored from the identity provider

pub mod actions;
pub mod activities;
pub mod cache;
pub mod models;
pub mod restate;

// Re-export commonly used types
pub use models::organization::Organization;
pub use restate::*;
