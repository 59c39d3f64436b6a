//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory cycle and plan repositories
//! - `events` - In-process event bus
//! - `notifications` - Expiring notification bus
//! - `clock` - System and fixed clocks
//! - `snapshot` - JSON/YAML snapshot loader that seeds the repositories

mod clock;
pub mod events;
pub mod memory;
pub mod notifications;
pub mod snapshot;

pub use clock::{FixedClock, SystemClock};
pub use events::InMemoryEventBus;
pub use memory::{InMemoryCycleRepository, InMemoryPdiRepository};
pub use notifications::NotificationBus;
pub use snapshot::{Snapshot, SnapshotError, SnapshotFormat};
