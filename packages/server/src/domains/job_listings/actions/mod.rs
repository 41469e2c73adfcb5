//! Job listing actions - business logic for listing and application writes
//!
//! Every write here revalidates the same tag sets the sync handlers use;
//! the cache layer does not care which path mutated the row.

mod application_actions;
mod listing_actions;

pub use application_actions::{
    apply_to_job_listing, update_application_rating, update_application_stage,
};
pub use listing_actions::{
    create_job_listing, delete_job_listing, update_job_listing, update_job_listing_status,
    NewJobListing,
};
