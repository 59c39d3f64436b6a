//! Classification value objects produced by the deadline classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::cycle::CycleDeadlineKind;
use crate::domain::foundation::{ActionId, CycleId, PdiId, Timestamp};

/// Number of days (inclusive) before a deadline during which it is urgent.
pub const URGENT_WINDOW_DAYS: i64 = 7;

/// How pressing a deadline is.
///
/// Variants are declared in ascending severity so `Ord` ranks them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeadlineSeverity {
    #[default]
    Ok,
    Urgent,
    Overdue,
}

impl DeadlineSeverity {
    /// Severity for a signed number of days remaining.
    pub fn from_days_remaining(days: i64) -> Self {
        if days < 0 {
            DeadlineSeverity::Overdue
        } else if days <= URGENT_WINDOW_DAYS {
            DeadlineSeverity::Urgent
        } else {
            DeadlineSeverity::Ok
        }
    }
}

impl fmt::Display for DeadlineSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeadlineSeverity::Ok => "OK",
            DeadlineSeverity::Urgent => "URGENT",
            DeadlineSeverity::Overdue => "OVERDUE",
        };
        write!(f, "{}", s)
    }
}

/// Derived classification of a nullable deadline relative to `now`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineClassification {
    /// Human readable summary, e.g. "3 days left".
    pub label: String,
    /// Signed whole days until the deadline; `None` when there is no deadline.
    pub days_remaining: Option<i64>,
    pub severity: DeadlineSeverity,
}

impl DeadlineClassification {
    /// Classification of an absent deadline: never urgent.
    pub fn no_deadline() -> Self {
        Self {
            label: "No deadline".to_string(),
            days_remaining: None,
            severity: DeadlineSeverity::Ok,
        }
    }

    /// Classification for a known number of days remaining.
    pub fn from_days_remaining(days: i64) -> Self {
        let label = match days {
            d if d < -1 => format!("Overdue by {} days", -d),
            -1 => "Overdue by 1 day".to_string(),
            0 => "Due today".to_string(),
            1 => "1 day left".to_string(),
            d => format!("{} days left", d),
        };
        Self {
            label,
            days_remaining: Some(days),
            severity: DeadlineSeverity::from_days_remaining(days),
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.severity == DeadlineSeverity::Overdue
    }

    pub fn is_urgent(&self) -> bool {
        self.severity == DeadlineSeverity::Urgent
    }
}

/// Where a classified deadline comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeadlineSource {
    Cycle {
        cycle_id: CycleId,
        kind: CycleDeadlineKind,
    },
    Plan {
        pdi_id: PdiId,
    },
    Action {
        pdi_id: PdiId,
        action_id: ActionId,
    },
}

/// A named deadline together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedDeadline {
    pub source: DeadlineSource,
    pub name: String,
    pub due_at: Option<Timestamp>,
    pub classification: DeadlineClassification,
}

impl ClassifiedDeadline {
    pub fn severity(&self) -> DeadlineSeverity {
        self.classification.severity
    }

    pub fn days_remaining(&self) -> Option<i64> {
        self.classification.days_remaining
    }
}
