//! Ports - Interfaces for external collaborators.
//!
//! The lifecycle engine is pure; persistence, event delivery, notifications
//! and time all come in through these traits. Adapters implement them.
//!
//! ## Persistence
//!
//! - `CycleRepository` - evaluation cycle records
//! - `PdiRepository` - development plans and their actions
//!
//! ## Events
//!
//! - `EventPublisher` / `EventSubscriber` / `EventHandler`
//!
//! ## Ambient
//!
//! - `Clock` - source of `now`
//! - `NotificationPublisher` - expiring user-facing notifications

mod clock;
mod cycle_repository;
mod event_publisher;
mod event_subscriber;
mod notification_publisher;
mod pdi_repository;

pub use clock::Clock;
pub use cycle_repository::CycleRepository;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use notification_publisher::{
    Notification, NotificationKind, NotificationPublisher, MAX_NOTIFICATION_TTL_MS,
};
pub use pdi_repository::PdiRepository;
