//! Progress derived from a plan's actions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Percentage;

use super::{DevelopmentPlan, PdiStatus};

/// Completion counts of a plan. Never stored; always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdiProgress {
    pub completed_actions: usize,
    pub total_actions: usize,
    pub percentage: Percentage,
}

impl PdiProgress {
    /// A COMPLETED plan always reports 100%, whatever its actions say.
    pub fn compute(plan: &DevelopmentPlan) -> Self {
        let completed_actions = plan.completed_actions();
        let total_actions = plan.actions.len();
        let percentage = if plan.status == PdiStatus::Completed {
            Percentage::HUNDRED
        } else {
            Percentage::from_ratio(completed_actions, total_actions)
        };
        Self {
            completed_actions,
            total_actions,
            percentage,
        }
    }
}

pub fn compute_progress(plan: &DevelopmentPlan) -> PdiProgress {
    PdiProgress::compute(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::pdi::{ActionDraft, ActionStatus};

    fn plan_with(statuses: &[ActionStatus], status: PdiStatus) -> DevelopmentPlan {
        let now = Timestamp::parse_rfc3339("2024-06-10T12:00:00Z").unwrap();
        let mut plan = DevelopmentPlan::new(UserId::new("ana").unwrap(), "Plan").unwrap();
        for (i, s) in statuses.iter().enumerate() {
            let id = plan.add_action(ActionDraft::new(format!("action {}", i))).unwrap();
            plan.set_action_status(id, *s, now).unwrap();
        }
        plan.status = status;
        plan
    }

    #[test]
    fn three_of_four_is_seventy_five() {
        use ActionStatus::*;
        let plan = plan_with(&[Completed, Completed, Completed, ToDo], PdiStatus::InProgress);
        let progress = compute_progress(&plan);
        assert_eq!(progress.completed_actions, 3);
        assert_eq!(progress.total_actions, 4);
        assert_eq!(progress.percentage.value(), 75);
    }

    #[test]
    fn no_actions_is_zero() {
        let plan = plan_with(&[], PdiStatus::InProgress);
        assert_eq!(compute_progress(&plan).percentage, Percentage::ZERO);
    }

    #[test]
    fn ratio_is_rounded() {
        use ActionStatus::*;
        let plan = plan_with(&[Completed, ToDo, ToDo], PdiStatus::InProgress);
        assert_eq!(compute_progress(&plan).percentage.value(), 33);

        let plan = plan_with(&[Completed, Completed, ToDo], PdiStatus::InProgress);
        assert_eq!(compute_progress(&plan).percentage.value(), 67);
    }

    #[test]
    fn completed_plan_overrides_ratio() {
        use ActionStatus::*;
        let plan = plan_with(&[ToDo, Blocked], PdiStatus::Completed);
        let progress = compute_progress(&plan);
        assert_eq!(progress.completed_actions, 0);
        assert_eq!(progress.percentage, Percentage::HUNDRED);
    }

    #[test]
    fn blocked_counts_as_not_completed() {
        use ActionStatus::*;
        let plan = plan_with(&[Blocked, Completed], PdiStatus::InProgress);
        assert_eq!(compute_progress(&plan).percentage.value(), 50);
    }
}
