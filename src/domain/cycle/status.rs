//! CycleStatus state machine for the coarse lifecycle of an evaluation cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Coarse lifecycle status of an evaluation cycle.
///
/// The serialized values are an external contract and must round-trip
/// unchanged through persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CycleStatus {
    /// Created, not yet opened. Initial state.
    #[default]
    Upcoming,
    /// The one system-wide active cycle.
    Open,
    /// Calibration in progress; no new assessments.
    Equalization,
    /// Finished. Terminal.
    Closed,
}

impl CycleStatus {
    /// Returns true while the cycle accepts phase changes.
    pub fn is_running(&self) -> bool {
        matches!(self, CycleStatus::Open | CycleStatus::Equalization)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, CycleStatus::Closed)
    }
}

impl StateMachine for CycleStatus {
    const ENTITY: &'static str = "cycle status";

    fn valid_transitions(&self) -> Vec<Self> {
        use CycleStatus::*;
        match self {
            Upcoming => vec![Open],
            Open => vec![Equalization, Closed],
            Equalization => vec![Closed],
            Closed => vec![],
        }
    }
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CycleStatus::Upcoming => "UPCOMING",
            CycleStatus::Open => "OPEN",
            CycleStatus::Equalization => "EQUALIZATION",
            CycleStatus::Closed => "CLOSED",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [CycleStatus; 4] = [
        CycleStatus::Upcoming,
        CycleStatus::Open,
        CycleStatus::Equalization,
        CycleStatus::Closed,
    ];

    #[test]
    fn default_is_upcoming() {
        assert_eq!(CycleStatus::default(), CycleStatus::Upcoming);
    }

    #[test]
    fn upcoming_can_only_open() {
        assert_eq!(CycleStatus::Upcoming.valid_transitions(), vec![CycleStatus::Open]);
        assert!(CycleStatus::Upcoming.transition_to(CycleStatus::Closed).is_err());
    }

    #[test]
    fn open_can_enter_equalization_or_close() {
        assert!(CycleStatus::Open.can_transition_to(&CycleStatus::Equalization));
        assert!(CycleStatus::Open.can_transition_to(&CycleStatus::Closed));
        assert!(!CycleStatus::Open.can_transition_to(&CycleStatus::Upcoming));
    }

    #[test]
    fn equalization_can_only_close() {
        assert_eq!(
            CycleStatus::Equalization.valid_transitions(),
            vec![CycleStatus::Closed]
        );
    }

    #[test]
    fn closed_is_terminal() {
        assert!(CycleStatus::Closed.is_terminal());
        for target in ALL {
            assert!(!CycleStatus::Closed.can_transition_to(&target));
        }
    }

    #[test]
    fn is_running_only_for_open_and_equalization() {
        assert!(!CycleStatus::Upcoming.is_running());
        assert!(CycleStatus::Open.is_running());
        assert!(CycleStatus::Equalization.is_running());
        assert!(!CycleStatus::Closed.is_running());
    }

    #[test]
    fn serialized_values_match_display() {
        for status in ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
            let back: CycleStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn rejects_unknown_wire_value() {
        assert!(serde_json::from_str::<CycleStatus>("\"open\"").is_err());
    }
}
