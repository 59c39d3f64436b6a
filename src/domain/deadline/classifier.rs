//! The deadline classifier.
//!
//! `days_remaining` is counted one of two ways:
//!
//! - [`DayCounting::CalendarDays`] compares UTC calendar dates, discarding
//!   hours. A deadline later today is "Due today" (0 days) and one earlier
//!   today is also 0 days, never overdue.
//! - [`DayCounting::Exact`] takes the ceiling of the exact difference in
//!   days, so a deadline 30 hours out is 2 days away and one 12 hours ago is
//!   `ceil(-0.5) = 0` days.
//!
//! A single classifier instance is shared by every call site, so cycles and
//! plans never disagree on the same date.

use serde::{Deserialize, Serialize};

use super::DeadlineClassification;
use crate::domain::foundation::Timestamp;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// How whole days between two instants are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DayCounting {
    #[default]
    CalendarDays,
    Exact,
}

impl DayCounting {
    /// Signed whole days from `now` until `target`.
    pub fn days_between(&self, now: Timestamp, target: Timestamp) -> i64 {
        match self {
            DayCounting::CalendarDays => (target.date() - now.date()).num_days(),
            DayCounting::Exact => {
                let millis = target.duration_since(&now).num_milliseconds();
                ceil_div(millis, MILLIS_PER_DAY)
            }
        }
    }
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    let quotient = value.div_euclid(divisor);
    if value.rem_euclid(divisor) == 0 {
        quotient
    } else {
        quotient + 1
    }
}

/// Turns nullable deadlines into [`DeadlineClassification`]s.
///
/// Pure: the caller always supplies `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeadlineClassifier {
    counting: DayCounting,
}

impl DeadlineClassifier {
    pub fn new(counting: DayCounting) -> Self {
        Self { counting }
    }

    pub fn counting(&self) -> DayCounting {
        self.counting
    }

    /// Classifies `target` relative to `now`.
    pub fn classify(&self, target: Option<Timestamp>, now: Timestamp) -> DeadlineClassification {
        match target {
            None => DeadlineClassification::no_deadline(),
            Some(target) => {
                DeadlineClassification::from_days_remaining(self.counting.days_between(now, target))
            }
        }
    }
}

/// Classifies with the default (calendar day) counting.
pub fn classify(target: Option<Timestamp>, now: Timestamp) -> DeadlineClassification {
    DeadlineClassifier::default().classify(target, now)
}
