//! Identity domain - lifecycle events delivered by the identity provider
//!
//! Users and employer organizations are owned by the identity provider and
//! mirrored locally. This domain holds the webhook event types, boundary
//! validation, and the shared sync result types.

pub mod events;
pub mod sync;

pub use events::{IdentityEvent, ValidationError};
pub use sync::{SyncOutcome, SyncResult};
