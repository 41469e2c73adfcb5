//! Organization domain activities - reconciliation steps run inside sync handlers

mod sync_organization;

pub use sync_organization::{
    create_organization, delete_organization, update_organization, CreateOrganizationOutcome,
    DeleteOrganizationOutcome, UpdateOrganizationOutcome,
};
