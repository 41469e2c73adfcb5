pub mod user;
pub mod user_notification;
pub mod user_notification_settings;
pub mod user_resume;

pub use user::User;
pub use user_notification::UserNotification;
pub use user_notification_settings::UserNotificationSettings;
pub use user_resume::UserResume;
