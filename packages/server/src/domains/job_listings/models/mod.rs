pub mod job_listing;
pub mod job_listing_application;

pub use job_listing::{JobListing, JobListingStatus};
pub use job_listing_application::{ApplicationStage, JobListingApplication};
