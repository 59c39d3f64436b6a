//! Dashboard query handlers.
//!
//! Read-only: nothing here writes to storage or publishes events.

mod get_deadline_overview;

pub use get_deadline_overview::{
    DeadlineOverviewReport, GetDeadlineOverviewHandler, GetDeadlineOverviewQuery, PlanReport,
};
