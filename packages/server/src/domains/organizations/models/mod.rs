pub mod organization;
pub mod organization_user_settings;

pub use organization::Organization;
pub use organization_user_settings::OrganizationUserSettings;
