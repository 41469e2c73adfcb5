//! Result types shared by the sync services.

use serde::{Deserialize, Serialize};

use crate::impl_restate_serde;

/// What a reconciliation handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// A new row was inserted.
    Created,
    /// A duplicate delivery found the row already present.
    AlreadyExists,
    /// An existing row was overwritten.
    Updated,
    /// The row was removed.
    Deleted,
    /// A delete targeted a row that was already absent.
    NotFound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResult {
    pub id: String,
    pub outcome: SyncOutcome,
}

impl_restate_serde!(SyncResult);
