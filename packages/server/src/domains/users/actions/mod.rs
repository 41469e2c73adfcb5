//! User domain actions - ordinary write paths
//!
//! Any write path that mutates a row revalidates the same tag sets the sync
//! handlers do; invalidation is not reserved for webhook traffic.

mod notification_actions;
mod resume_actions;
mod settings_actions;

pub use notification_actions::record_new_job_notifications;
pub use resume_actions::{set_resume_ai_summary, upsert_user_resume};
pub use settings_actions::upsert_notification_settings;
