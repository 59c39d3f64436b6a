//! Per-cycle deadline summary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::deadline::{ClassifiedDeadline, DeadlineClassifier, DeadlineSource};
use crate::domain::foundation::{CycleId, Timestamp};

use super::EvaluationCycle;

/// The dates of a cycle that appear in its deadline summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CycleDeadlineKind {
    Assessment,
    ManagerReview,
    Equalization,
    CycleEnd,
}

impl CycleDeadlineKind {
    /// Summary order.
    pub const ALL: [CycleDeadlineKind; 4] = [
        CycleDeadlineKind::Assessment,
        CycleDeadlineKind::ManagerReview,
        CycleDeadlineKind::Equalization,
        CycleDeadlineKind::CycleEnd,
    ];
}

impl fmt::Display for CycleDeadlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CycleDeadlineKind::Assessment => "Assessment deadline",
            CycleDeadlineKind::ManagerReview => "Manager review deadline",
            CycleDeadlineKind::Equalization => "Equalization deadline",
            CycleDeadlineKind::CycleEnd => "Cycle end",
        };
        write!(f, "{}", s)
    }
}

/// Classified deadlines of one cycle plus urgent/overdue counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleDeadlineSummary {
    pub cycle_id: CycleId,
    pub cycle_name: String,
    /// One entry per [`CycleDeadlineKind`], in `ALL` order, absent dates included.
    pub deadlines: Vec<ClassifiedDeadline>,
    pub urgent_count: usize,
    pub overdue_count: usize,
}

impl CycleDeadlineSummary {
    /// Entry for one kind of deadline.
    pub fn deadline(&self, kind: CycleDeadlineKind) -> Option<&ClassifiedDeadline> {
        self.deadlines.iter().find(|d| {
            matches!(d.source, DeadlineSource::Cycle { kind: k, .. } if k == kind)
        })
    }
}

/// Classifies the phase deadlines and end date of `cycle`.
pub fn summarize_deadlines(
    cycle: &EvaluationCycle,
    now: Timestamp,
    classifier: &DeadlineClassifier,
) -> CycleDeadlineSummary {
    let deadlines: Vec<ClassifiedDeadline> = CycleDeadlineKind::ALL
        .iter()
        .map(|&kind| {
            let due_at = cycle.deadline_for(kind);
            ClassifiedDeadline {
                source: DeadlineSource::Cycle {
                    cycle_id: cycle.id,
                    kind,
                },
                name: kind.to_string(),
                due_at,
                classification: classifier.classify(due_at, now),
            }
        })
        .collect();

    let urgent_count = deadlines.iter().filter(|d| d.classification.is_urgent()).count();
    let overdue_count = deadlines.iter().filter(|d| d.classification.is_overdue()).count();

    CycleDeadlineSummary {
        cycle_id: cycle.id,
        cycle_name: cycle.name.clone(),
        deadlines,
        urgent_count,
        overdue_count,
    }
}
