// HTTP routes
pub mod health;
pub mod webhooks;

pub use health::*;
pub use webhooks::*;
