//! Review Lifecycle - lifecycle and deadline engine for evaluation cycles
//! and individual development plans (PDIs).
//!
//! The domain layer is pure: it validates status and phase transitions,
//! enforces a single open cycle, and derives progress and deadline urgency
//! from raw records. Handlers in the application layer load and persist
//! those records through the ports and publish lifecycle events.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
