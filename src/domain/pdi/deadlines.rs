//! Deadline checks for development plans and their actions.

use serde::{Deserialize, Serialize};

use crate::domain::deadline::{
    ClassifiedDeadline, DeadlineClassifier, DeadlineSeverity, DeadlineSource,
};
use crate::domain::foundation::{PdiId, Timestamp, UserId};

use super::{DevelopmentPlan, PdiAction, PdiStatus};

/// True when the plan's end date is past. Finished plans are never overdue.
pub fn is_overdue(plan: &DevelopmentPlan, now: Timestamp, classifier: &DeadlineClassifier) -> bool {
    !plan.status.is_finished() && classifier.classify(plan.end_date, now).is_overdue()
}

/// True when the plan's end date is inside the urgent window.
pub fn is_near_deadline(
    plan: &DevelopmentPlan,
    now: Timestamp,
    classifier: &DeadlineClassifier,
) -> bool {
    !plan.status.is_finished() && classifier.classify(plan.end_date, now).is_urgent()
}

/// Exact-instant check: an action due earlier today is already overdue.
/// [`PdiDeadlineInfo`] counts by the classifier's day counting instead.
pub fn is_action_overdue(action: &PdiAction, now: Timestamp) -> bool {
    action.is_overdue(now)
}

/// Classified deadlines of one plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdiDeadlineInfo {
    pub pdi_id: PdiId,
    pub owner_id: UserId,
    pub title: String,
    pub status: PdiStatus,
    /// End-date entry; `None` for COMPLETED and ARCHIVED plans.
    pub plan_deadline: Option<ClassifiedDeadline>,
    /// Not-completed actions that carry a deadline, in plan order.
    pub action_deadlines: Vec<ClassifiedDeadline>,
    pub is_overdue: bool,
    pub is_near_deadline: bool,
    /// Entries of `action_deadlines` classified OVERDUE.
    pub overdue_action_count: usize,
}

impl PdiDeadlineInfo {
    pub fn build(plan: &DevelopmentPlan, now: Timestamp, classifier: &DeadlineClassifier) -> Self {
        let plan_deadline = if plan.status.is_finished() {
            None
        } else {
            Some(ClassifiedDeadline {
                source: DeadlineSource::Plan { pdi_id: plan.id },
                name: plan.title.clone(),
                due_at: plan.end_date,
                classification: classifier.classify(plan.end_date, now),
            })
        };

        let action_deadlines = if plan.status.is_finished() {
            Vec::new()
        } else {
            plan.actions
                .iter()
                .filter(|a| !a.status.is_completed() && a.deadline.is_some())
                .map(|a| ClassifiedDeadline {
                    source: DeadlineSource::Action {
                        pdi_id: plan.id,
                        action_id: a.id,
                    },
                    name: a.title.clone(),
                    due_at: a.deadline,
                    classification: classifier.classify(a.deadline, now),
                })
                .collect()
        };

        let is_overdue = plan_deadline.as_ref().is_some_and(|d| d.classification.is_overdue());
        let is_near_deadline = plan_deadline.as_ref().is_some_and(|d| d.classification.is_urgent());
        let overdue_action_count = action_deadlines
            .iter()
            .filter(|d| d.classification.is_overdue())
            .count();

        Self {
            pdi_id: plan.id,
            owner_id: plan.owner_id.clone(),
            title: plan.title.clone(),
            status: plan.status,
            plan_deadline,
            action_deadlines,
            is_overdue,
            is_near_deadline,
            overdue_action_count,
        }
    }

    /// Plan entry first, then actions.
    pub fn deadlines(&self) -> impl Iterator<Item = &ClassifiedDeadline> {
        self.plan_deadline.iter().chain(self.action_deadlines.iter())
    }

    pub fn worst_severity(&self) -> DeadlineSeverity {
        self.deadlines()
            .map(|d| d.severity())
            .max()
            .unwrap_or_default()
    }
}
