// Hirelight - Job Board Sync Core
//
// This crate provides the backend sync core for the job-board marketplace:
// identity-provider webhook ingestion, durable reconciliation workflows via
// Restate, and tag-based cache invalidation.
//
// Sync services are organized per-domain in domains/*/restate/

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;
pub mod workflows_client;

pub use config::*;
