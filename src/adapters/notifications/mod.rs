//! Notification adapters.

mod bus;

pub use bus::NotificationBus;
