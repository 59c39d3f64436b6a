//! CyclePhase - the activity gate inside an open cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Which kind of assessment an open cycle currently permits.
///
/// Phases only move forward through the validated path:
/// `ASSESSMENTS -> MANAGER_REVIEWS -> EQUALIZATION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CyclePhase {
    #[default]
    Assessments,
    ManagerReviews,
    Equalization,
}

impl CyclePhase {
    /// All phases in order.
    pub const ALL: [CyclePhase; 3] = [
        CyclePhase::Assessments,
        CyclePhase::ManagerReviews,
        CyclePhase::Equalization,
    ];

    /// Position in the phase order, starting at 0.
    pub fn order_index(&self) -> u8 {
        match self {
            CyclePhase::Assessments => 0,
            CyclePhase::ManagerReviews => 1,
            CyclePhase::Equalization => 2,
        }
    }

    /// The phase that follows this one, if any.
    pub fn next(&self) -> Option<CyclePhase> {
        match self {
            CyclePhase::Assessments => Some(CyclePhase::ManagerReviews),
            CyclePhase::ManagerReviews => Some(CyclePhase::Equalization),
            CyclePhase::Equalization => None,
        }
    }
}

impl StateMachine for CyclePhase {
    const ENTITY: &'static str = "cycle phase";

    fn valid_transitions(&self) -> Vec<Self> {
        self.next().into_iter().collect()
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CyclePhase::Assessments => "ASSESSMENTS",
            CyclePhase::ManagerReviews => "MANAGER_REVIEWS",
            CyclePhase::Equalization => "EQUALIZATION",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_assessments() {
        assert_eq!(CyclePhase::default(), CyclePhase::Assessments);
    }

    #[test]
    fn only_successor_is_valid() {
        for from in CyclePhase::ALL {
            for to in CyclePhase::ALL {
                let expected = to.order_index() == from.order_index() + 1;
                assert_eq!(from.can_transition_to(&to), expected, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn equalization_is_terminal() {
        assert!(CyclePhase::Equalization.is_terminal());
        assert_eq!(CyclePhase::Equalization.next(), None);
    }

    #[test]
    fn order_index_follows_declaration_order() {
        let indices: Vec<u8> = CyclePhase::ALL.iter().map(|p| p.order_index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn serializes_to_contract_values() {
        assert_eq!(
            serde_json::to_string(&CyclePhase::ManagerReviews).unwrap(),
            "\"MANAGER_REVIEWS\""
        );
        let phase: CyclePhase = serde_json::from_str("\"EQUALIZATION\"").unwrap();
        assert_eq!(phase, CyclePhase::Equalization);
    }
}
