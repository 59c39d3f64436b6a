//! Clock port.
//!
//! Handlers ask the injected clock for `now` and pass it into the domain,
//! which never reads time on its own.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
