mod notification;

pub use notification::{DeliveryReceipt, DispatchStatus, NotificationRequest};
