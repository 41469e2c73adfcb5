// Common utilities shared across the application

pub mod restate_serde;
