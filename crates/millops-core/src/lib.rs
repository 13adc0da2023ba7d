pub mod catalog;
pub mod error;
pub mod notifications;
pub mod snapshot;
pub mod types;

pub use notifications::{calculate_magnet_notifications, should_show_notification_for_session};
pub use snapshot::Snapshot;
