//! Dashboard module - cross-entity deadline aggregation.

pub mod summary;

pub use summary::{aggregate, DeadlineOverview, HasDeadlines};
