pub mod organizations_sync;

pub use organizations_sync::*;
