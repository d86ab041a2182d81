//! Notification scheduling for Kasa.
//!
//! A reserved date+time turns into a local notification whose text depends
//! on whether rain is expected shortly after the reserved time. Delivery is
//! behind the [`NotificationScheduler`] port; this crate ships the message
//! table, the identifier scheme and an in-memory pending-request registry.

pub mod dispatch;
pub mod message;
pub mod scheduler;

pub use dispatch::RainAlertPlanner;
pub use message::{notification_identifier, rain_message, NOTIFICATION_TITLE};
pub use scheduler::{
    NotificationRequest, NotificationScheduler, NotifyError, PendingNotifications,
};
