// Business domains
pub mod identity;
pub mod job_listings;
pub mod organizations;
pub mod users;
