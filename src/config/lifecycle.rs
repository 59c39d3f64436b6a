//! Lifecycle engine configuration

use serde::Deserialize;

use crate::domain::cycle::ActivationPolicy;
use crate::domain::deadline::{DayCounting, DeadlineClassifier};

use super::error::ValidationError;

/// Upper bound for `default_cycle_duration_days` (about ten years).
pub const MAX_CYCLE_DURATION_DAYS: i64 = 3650;

/// Policies applied by the cycle and deadline engines
#[derive(Debug, Clone, Deserialize)]
pub struct LifecycleConfig {
    /// Derive a missing cycle end date on activation
    #[serde(default)]
    pub auto_set_end_date: bool,

    /// Duration used when deriving the end date
    #[serde(default = "default_cycle_duration_days")]
    pub default_cycle_duration_days: i64,

    /// Day counting shared by every deadline classification
    #[serde(default)]
    pub day_counting: DayCounting,
}

impl LifecycleConfig {
    pub fn activation_policy(&self) -> ActivationPolicy {
        ActivationPolicy {
            auto_set_end_date: self.auto_set_end_date,
            default_duration_days: self.default_cycle_duration_days,
        }
    }

    pub fn classifier(&self) -> DeadlineClassifier {
        DeadlineClassifier::new(self.day_counting)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_CYCLE_DURATION_DAYS).contains(&self.default_cycle_duration_days) {
            return Err(ValidationError::InvalidCycleDuration {
                max: MAX_CYCLE_DURATION_DAYS,
            });
        }
        Ok(())
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            auto_set_end_date: false,
            default_cycle_duration_days: default_cycle_duration_days(),
            day_counting: DayCounting::default(),
        }
    }
}

fn default_cycle_duration_days() -> i64 {
    90
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_activation_policy_defaults() {
        let config = LifecycleConfig::default();
        assert_eq!(config.activation_policy(), ActivationPolicy::default());
        assert_eq!(config.classifier().counting(), DayCounting::CalendarDays);
    }

    #[test]
    fn non_positive_duration_is_invalid() {
        let config = LifecycleConfig {
            default_cycle_duration_days: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidCycleDuration {
                max: MAX_CYCLE_DURATION_DAYS
            })
        );
    }

    #[test]
    fn duration_above_ten_years_is_invalid() {
        let mut config = LifecycleConfig {
            auto_set_end_date: true,
            default_cycle_duration_days: 1_000_000_000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCycleDuration { .. })
        ));

        config.default_cycle_duration_days = MAX_CYCLE_DURATION_DAYS;
        assert!(config.validate().is_ok());
    }
}
