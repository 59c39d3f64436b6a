//! PdiStatus state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of an individual development plan.
///
/// ```text
/// NOT_STARTED ──► IN_PROGRESS ──► COMPLETED
///                    ▲    │           │
///                    │    ▼           │
///                    └─ ARCHIVED ◄────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PdiStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    /// Shelved. Read-only until reactivated.
    Archived,
}

impl PdiStatus {
    pub const ALL: [PdiStatus; 4] = [
        PdiStatus::NotStarted,
        PdiStatus::InProgress,
        PdiStatus::Completed,
        PdiStatus::Archived,
    ];

    /// Finished or shelved plans are never overdue or near their deadline.
    pub fn is_finished(&self) -> bool {
        matches!(self, PdiStatus::Completed | PdiStatus::Archived)
    }

    pub fn is_archived(&self) -> bool {
        matches!(self, PdiStatus::Archived)
    }
}

impl StateMachine for PdiStatus {
    const ENTITY: &'static str = "PDI status";

    fn valid_transitions(&self) -> Vec<Self> {
        use PdiStatus::*;
        match self {
            NotStarted => vec![InProgress],
            InProgress => vec![Completed, Archived],
            Completed => vec![Archived],
            Archived => vec![InProgress],
        }
    }
}

impl fmt::Display for PdiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PdiStatus::NotStarted => "NOT_STARTED",
            PdiStatus::InProgress => "IN_PROGRESS",
            PdiStatus::Completed => "COMPLETED",
            PdiStatus::Archived => "ARCHIVED",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table_is_exact() {
        use PdiStatus::*;
        let allowed = [
            (NotStarted, InProgress),
            (InProgress, Completed),
            (InProgress, Archived),
            (Completed, Archived),
            (Archived, InProgress),
        ];
        for from in PdiStatus::ALL {
            for to in PdiStatus::ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    allowed.contains(&(from, to)),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn no_status_is_terminal() {
        for status in PdiStatus::ALL {
            assert!(!status.is_terminal());
        }
    }

    #[test]
    fn finished_statuses() {
        assert!(!PdiStatus::NotStarted.is_finished());
        assert!(!PdiStatus::InProgress.is_finished());
        assert!(PdiStatus::Completed.is_finished());
        assert!(PdiStatus::Archived.is_finished());
    }

    #[test]
    fn serialized_values_match_display() {
        for status in PdiStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
            assert_eq!(serde_json::from_str::<PdiStatus>(&json).unwrap(), status);
        }
    }
}
