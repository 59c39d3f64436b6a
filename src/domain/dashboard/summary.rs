//! Lifecycle summary - reduces classified deadlines from cycles and plans
//! into the figures a dashboard shows.

use serde::{Deserialize, Serialize};

use crate::domain::cycle::CycleDeadlineSummary;
use crate::domain::deadline::ClassifiedDeadline;
use crate::domain::pdi::PdiDeadlineInfo;

/// Anything that contributes classified deadlines to a dashboard.
pub trait HasDeadlines {
    /// Entries in a stable order; that order breaks ties in [`aggregate`].
    fn classified_deadlines(&self) -> Vec<&ClassifiedDeadline>;
}

impl HasDeadlines for CycleDeadlineSummary {
    fn classified_deadlines(&self) -> Vec<&ClassifiedDeadline> {
        self.deadlines.iter().collect()
    }
}

impl HasDeadlines for PdiDeadlineInfo {
    fn classified_deadlines(&self) -> Vec<&ClassifiedDeadline> {
        self.deadlines().collect()
    }
}

/// Dashboard-ready reduction of many deadline sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineOverview {
    pub urgent_count: usize,
    pub overdue_count: usize,
    pub next_deadline: Option<ClassifiedDeadline>,
}

/// Counts urgent and overdue entries and picks the next deadline.
///
/// `next_deadline` is the entry with the smallest non-negative
/// `days_remaining`. When every dated entry is already past, it falls back
/// to the most severe dated entry. Ties go to the earliest entry in input
/// order. Entries without a due date are never picked.
pub fn aggregate(sources: &[&dyn HasDeadlines]) -> DeadlineOverview {
    let entries: Vec<&ClassifiedDeadline> = sources
        .iter()
        .flat_map(|s| s.classified_deadlines())
        .collect();

    let urgent_count = entries.iter().filter(|d| d.classification.is_urgent()).count();
    let overdue_count = entries.iter().filter(|d| d.classification.is_overdue()).count();

    let mut upcoming: Option<(i64, &ClassifiedDeadline)> = None;
    let mut most_severe: Option<&ClassifiedDeadline> = None;
    for entry in entries.iter().copied() {
        let Some(days) = entry.days_remaining() else {
            continue;
        };
        if days >= 0 && upcoming.map_or(true, |(best, _)| days < best) {
            upcoming = Some((days, entry));
        }
        if most_severe.map_or(true, |m| entry.severity() > m.severity()) {
            most_severe = Some(entry);
        }
    }

    let next_deadline = upcoming.map(|(_, d)| d).or(most_severe).cloned();

    tracing::debug!(
        entries = entries.len(),
        urgent_count,
        overdue_count,
        "Deadline overview aggregated"
    );

    DeadlineOverview {
        urgent_count,
        overdue_count,
        next_deadline,
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod summary_test;
