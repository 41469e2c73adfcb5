//! Job listings domain - listings posted by organizations and the
//! applications job seekers file against them

pub mod actions;
pub mod cache;
pub mod models;

// Re-export commonly used types
pub use models::job_listing::{JobListing, JobListingStatus};
pub use models::job_listing_application::{ApplicationStage, JobListingApplication};
