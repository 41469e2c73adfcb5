//! Organization domain actions - ordinary write paths

mod settings_actions;

pub use settings_actions::upsert_organization_user_settings;
