use proptest::prelude::*;
use rust_decimal::Decimal;
use std::time::{Duration, Instant};

use liftrs::debounce::SelectionDebouncer;
use liftrs::fatigue::{ClassifierConfig, FatigueClassifier};
use liftrs::heatmap::fatigue_to_intensity;
use liftrs::models::{FatigueStatus, MuscleFatigue};
use liftrs::ranking::rank_muscles;
use liftrs::readiness::{readiness_from_fatigue_score, ReadinessConfig};

fn arbitrary_muscle() -> impl Strategy<Value = MuscleFatigue> {
    (
        "[a-z]{3,10}",
        0u32..50_000,
        proptest::option::of(1u32..50_000),
        -50.0f64..250.0,
    )
        .prop_map(|(group, last7, baseline, score)| MuscleFatigue {
            muscle_group: group,
            last7_days_volume: Decimal::from(last7),
            baseline_volume: baseline.map(Decimal::from),
            fatigue_score: score,
            status: FatigueStatus::NoData,
            fatigued: false,
            under_trained: false,
            baseline_missing: false,
            last_trained_at: None,
        })
}

proptest! {
    /// Readiness percent is always within 0-100, for any real score
    #[test]
    fn readiness_percent_in_range(score in -1.0e6f64..1.0e6) {
        let readiness = readiness_from_fatigue_score(score);
        prop_assert!(readiness.percent <= 100);
    }

    /// The transform is monotonically non-increasing in the fatigue score
    #[test]
    fn readiness_monotonic(a in -1000.0f64..1000.0, b in -1000.0f64..1000.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            readiness_from_fatigue_score(low).percent
                >= readiness_from_fatigue_score(high).percent
        );
    }

    /// Buckets stay inside the usable range for any readiness and palette
    #[test]
    fn bucket_in_usable_range(percent in 0u8..=100, palette in 2usize..16) {
        let bucket = fatigue_to_intensity(percent, palette).unwrap();
        prop_assert!(bucket >= 1);
        prop_assert!(bucket <= (palette - 1) as u8);
    }

    /// More fatigue never yields a lower intensity bucket
    #[test]
    fn bucket_monotonic_in_fatigue(a in 0u8..=100, b in 0u8..=100) {
        let (fresher, tireder) = if a >= b { (a, b) } else { (b, a) };
        prop_assert!(
            fatigue_to_intensity(fresher, 6).unwrap()
                <= fatigue_to_intensity(tireder, 6).unwrap()
        );
    }

    /// Classification is idempotent and its flags agree with the status
    #[test]
    fn classification_idempotent_and_consistent(muscle in arbitrary_muscle()) {
        let config = ClassifierConfig::default();
        let once = FatigueClassifier::classify(&muscle, &config);
        let twice = FatigueClassifier::classify(&once, &config);
        prop_assert_eq!(&once, &twice);

        prop_assert_eq!(once.fatigued, once.status.is_fatigued());
        prop_assert_eq!(once.under_trained, once.status == FatigueStatus::UnderTrained);
        prop_assert_eq!(once.baseline_missing, once.baseline_volume.is_none());
        if once.last7_days_volume.is_zero() {
            prop_assert_eq!(once.status, FatigueStatus::NoData);
        }
    }

    /// Ranking preserves the input set and orders by severity rank
    #[test]
    fn ranking_is_a_permutation_in_severity_order(
        muscles in proptest::collection::vec(arbitrary_muscle(), 0..12)
    ) {
        let config = ClassifierConfig::default();
        let classified: Vec<MuscleFatigue> = muscles
            .iter()
            .map(|muscle| FatigueClassifier::classify(muscle, &config))
            .collect();

        let overview = rank_muscles(&classified, &ReadinessConfig::default());
        prop_assert_eq!(overview.ranked.len(), classified.len());

        for pair in overview.ranked.windows(2) {
            prop_assert!(
                pair[0].muscle.status.severity_rank()
                    <= pair[1].muscle.status.severity_rank()
            );
        }

        prop_assert!(overview.fatigued_muscles.len() <= 3);
        prop_assert!(overview.freshest_muscles.len() <= 3);
        if classified.is_empty() {
            prop_assert!(overview.average_readiness.is_none());
        } else {
            prop_assert!(overview.average_readiness.is_some());
        }
    }

    /// No two accepted selections ever fall inside the debounce window
    #[test]
    fn debounce_spacing_invariant(offsets in proptest::collection::vec(0u64..5_000, 1..40)) {
        let mut sorted = offsets;
        sorted.sort_unstable();

        let start = Instant::now();
        let mut debouncer = SelectionDebouncer::new();
        let mut accepted: Vec<u64> = Vec::new();

        for offset in sorted {
            if debouncer.accept(start + Duration::from_millis(offset)) {
                accepted.push(offset);
            }
        }

        for pair in accepted.windows(2) {
            prop_assert!(pair[1] - pair[0] >= 300);
        }
    }
}
