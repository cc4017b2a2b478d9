pub mod aggregate;

pub use aggregate::{
    Notification, NotificationDto, NotificationId, NotificationKind, NotificationStatus,
};
