pub mod users_sync;

pub use users_sync::*;
