//! PDI module - individual development plans and their actions.
//!
//! Status and action-status state machines, archive immutability, and
//! progress/overdue figures derived from raw dates and action statuses.

mod action;
mod aggregate;
mod deadlines;
mod events;
mod progress;
mod status;

pub use action::{ActionDraft, ActionPriority, ActionStatus, ActionStatusChange, PdiAction};
pub use aggregate::{DevelopmentPlan, PlanDetails};
pub use deadlines::{is_action_overdue, is_near_deadline, is_overdue, PdiDeadlineInfo};
pub use events::{PdiActionStatusChanged, PdiDeleted, PdiStatusChanged};
pub use progress::{compute_progress, PdiProgress};
pub use status::PdiStatus;
