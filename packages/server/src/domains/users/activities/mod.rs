//! User domain activities - reconciliation steps run inside sync handlers

mod sync_user;

pub use sync_user::{
    create_user, delete_user, update_user, CreateUserOutcome, UpdateUserOutcome,
};
