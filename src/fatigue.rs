//! Per-muscle fatigue classification
//!
//! Maps the upstream fatigue score plus volume/recency context onto the
//! five-value [`FatigueStatus`] taxonomy and the derived booleans, and
//! produces the companion presentation hint.
//!
//! The classifier does not recompute the fatigue score; that aggregation is
//! external. It owns only the mapping, and the mapping is idempotent: the
//! same inputs always produce the same status and flags, and reclassifying
//! an already-classified entry is a no-op.
//!
//! # Status Mapping
//!
//! Thresholds ride on the readiness percentage so the classifier stays in
//! step with the readiness bands:
//!
//! - Zero window volume → `no-data` (regardless of baseline)
//! - Readiness below 45% → `high-fatigue`
//! - Readiness below 65% → `moderate-fatigue`
//! - Baseline present and window volume under 60% of it → `under-trained`
//! - Otherwise → `optimal`

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{FatigueResult, FatigueStatus, MuscleFatigue};
use crate::readiness::{percent_from_score, ReadinessConfig};

/// Tunable classifier policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Readiness transform constants the percent thresholds ride on
    pub readiness: ReadinessConfig,

    /// Window volume below this fraction of baseline counts as under-trained
    pub under_trained_ratio: Decimal,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            readiness: ReadinessConfig::default(),
            under_trained_ratio: dec!(0.60),
        }
    }
}

/// Fatigue classification utilities
pub struct FatigueClassifier;

impl FatigueClassifier {
    /// Derive the discrete status for one muscle's aggregates
    pub fn status_for(
        fatigue_score: f64,
        last7_days_volume: Decimal,
        baseline_volume: Option<Decimal>,
        config: &ClassifierConfig,
    ) -> FatigueStatus {
        if last7_days_volume.is_zero() {
            return FatigueStatus::NoData;
        }

        let percent = percent_from_score(fatigue_score, &config.readiness);
        if percent < 45 {
            return FatigueStatus::HighFatigue;
        }
        if percent < 65 {
            return FatigueStatus::ModerateFatigue;
        }

        if let Some(baseline) = baseline_volume {
            if !baseline.is_zero() && last7_days_volume < baseline * config.under_trained_ratio {
                return FatigueStatus::UnderTrained;
            }
        }

        FatigueStatus::Optimal
    }

    /// Re-derive status and flags for one muscle entry
    ///
    /// Pure: returns a new value, never mutates the input.
    pub fn classify(muscle: &MuscleFatigue, config: &ClassifierConfig) -> MuscleFatigue {
        let status = Self::status_for(
            muscle.fatigue_score,
            muscle.last7_days_volume,
            muscle.baseline_volume,
            config,
        );

        MuscleFatigue {
            status,
            fatigued: status.is_fatigued(),
            under_trained: status == FatigueStatus::UnderTrained,
            baseline_missing: muscle.baseline_volume.is_none(),
            ..muscle.clone()
        }
    }

    /// Re-derive the whole snapshot
    pub fn classify_result(result: &FatigueResult, config: &ClassifierConfig) -> FatigueResult {
        FatigueResult {
            per_muscle: result
                .per_muscle
                .iter()
                .map(|muscle| Self::classify(muscle, config))
                .collect(),
            ..result.clone()
        }
    }

    /// Presentation hint for a classified entry
    ///
    /// First matching rule wins; the order is part of the contract and must
    /// not be reordered.
    pub fn hint_for_item(muscle: &MuscleFatigue) -> Option<&'static str> {
        if muscle.fatigued {
            Some("Needs rest")
        } else if muscle.under_trained {
            Some("Good to target")
        } else if muscle.baseline_missing && !muscle.last7_days_volume.is_zero() {
            Some("Building baseline")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn muscle(
        group: &str,
        last7: Decimal,
        baseline: Option<Decimal>,
        score: f64,
    ) -> MuscleFatigue {
        MuscleFatigue {
            muscle_group: group.to_string(),
            last7_days_volume: last7,
            baseline_volume: baseline,
            fatigue_score: score,
            status: FatigueStatus::NoData,
            fatigued: false,
            under_trained: false,
            baseline_missing: false,
            last_trained_at: Some(Utc::now()),
        }
    }

    fn config() -> ClassifierConfig {
        ClassifierConfig::default()
    }

    #[test]
    fn test_zero_window_volume_is_no_data() {
        // Zero recent volume wins over everything, baseline or not
        let status =
            FatigueClassifier::status_for(70.0, Decimal::ZERO, Some(dec!(10000)), &config());
        assert_eq!(status, FatigueStatus::NoData);

        let status = FatigueClassifier::status_for(70.0, Decimal::ZERO, None, &config());
        assert_eq!(status, FatigueStatus::NoData);
    }

    #[test]
    fn test_high_fatigue_below_45_percent() {
        // Score 133 → 120 - 63*1.2 = 44.4 → 44% readiness
        let status =
            FatigueClassifier::status_for(133.0, dec!(8000), Some(dec!(8000)), &config());
        assert_eq!(status, FatigueStatus::HighFatigue);
    }

    #[test]
    fn test_moderate_fatigue_between_45_and_65_percent() {
        // Score 120 → 120 - 50*1.2 = 60% readiness
        let status =
            FatigueClassifier::status_for(120.0, dec!(8000), Some(dec!(8000)), &config());
        assert_eq!(status, FatigueStatus::ModerateFatigue);
    }

    #[test]
    fn test_under_trained_requires_baseline_and_low_volume() {
        // Rested score, volume at half of baseline
        let status =
            FatigueClassifier::status_for(70.0, dec!(4000), Some(dec!(10000)), &config());
        assert_eq!(status, FatigueStatus::UnderTrained);

        // Same volume, no baseline: cannot be under-trained
        let status = FatigueClassifier::status_for(70.0, dec!(4000), None, &config());
        assert_eq!(status, FatigueStatus::Optimal);

        // Volume at exactly the ratio boundary is not under-trained
        let status =
            FatigueClassifier::status_for(70.0, dec!(6000), Some(dec!(10000)), &config());
        assert_eq!(status, FatigueStatus::Optimal);
    }

    #[test]
    fn test_fatigue_outranks_under_trained() {
        // Low volume against baseline, but the score says moderate fatigue
        let status =
            FatigueClassifier::status_for(120.0, dec!(4000), Some(dec!(10000)), &config());
        assert_eq!(status, FatigueStatus::ModerateFatigue);
    }

    #[test]
    fn test_classify_sets_consistent_flags() {
        let classified =
            FatigueClassifier::classify(&muscle("chest", dec!(8000), Some(dec!(8000)), 130.0), &config());
        assert_eq!(classified.status, FatigueStatus::ModerateFatigue);
        assert!(classified.fatigued);
        assert!(!classified.under_trained);
        assert!(!classified.baseline_missing);

        let classified =
            FatigueClassifier::classify(&muscle("back", dec!(3000), Some(dec!(10000)), 70.0), &config());
        assert_eq!(classified.status, FatigueStatus::UnderTrained);
        assert!(!classified.fatigued);
        assert!(classified.under_trained);
    }

    #[test]
    fn test_baseline_missing_does_not_force_no_data() {
        // Missing baseline with recent volume stays classifiable
        let classified =
            FatigueClassifier::classify(&muscle("calves", dec!(2000), None, 75.0), &config());
        assert!(classified.baseline_missing);
        assert_eq!(classified.status, FatigueStatus::Optimal);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let input = muscle("legs", dec!(9000), Some(dec!(8000)), 125.0);
        let once = FatigueClassifier::classify(&input, &config());
        let twice = FatigueClassifier::classify(&once, &config());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_hint_order_is_significant() {
        // Fatigued wins even when under-trained volume-wise
        let mut entry = muscle("chest", dec!(3000), Some(dec!(10000)), 130.0);
        entry = FatigueClassifier::classify(&entry, &config());
        assert_eq!(FatigueClassifier::hint_for_item(&entry), Some("Needs rest"));

        let entry =
            FatigueClassifier::classify(&muscle("back", dec!(3000), Some(dec!(10000)), 70.0), &config());
        assert_eq!(
            FatigueClassifier::hint_for_item(&entry),
            Some("Good to target")
        );

        let entry = FatigueClassifier::classify(&muscle("calves", dec!(2000), None, 75.0), &config());
        assert_eq!(
            FatigueClassifier::hint_for_item(&entry),
            Some("Building baseline")
        );

        let entry =
            FatigueClassifier::classify(&muscle("quads", dec!(9000), Some(dec!(9000)), 72.0), &config());
        assert_eq!(FatigueClassifier::hint_for_item(&entry), None);
    }

    #[test]
    fn test_no_hint_for_no_data_without_volume() {
        let entry = FatigueClassifier::classify(&muscle("forearms", Decimal::ZERO, None, 70.0), &config());
        assert_eq!(entry.status, FatigueStatus::NoData);
        assert_eq!(FatigueClassifier::hint_for_item(&entry), None);
    }
}
