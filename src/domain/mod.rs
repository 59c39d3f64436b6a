//! Domain layer containing the review lifecycle engine.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `deadline` - Deadline classification (OK / URGENT / OVERDUE)
//! - `cycle` - Evaluation cycle status, phase and activation
//! - `pdi` - Individual development plans and their actions
//! - `dashboard` - Aggregation of deadlines for dashboards
//!
//! Nothing in this layer reads the clock or performs I/O; `now` is always
//! passed in.

pub mod cycle;
pub mod dashboard;
pub mod deadline;
pub mod foundation;
pub mod pdi;
