//! User domain Restate services

pub mod services;

pub use services::*;
