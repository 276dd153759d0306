//! Muscle status ranking and recovery-view summaries
//!
//! Orders the per-muscle set for display and derives the secondary
//! summaries: weakest muscle, top fatigued, top fresh, and the whole-body
//! average readiness with its own banding.
//!
//! # Ordering
//!
//! Primary key is status severity (high fatigue first, no data last).
//! Within a status the tie-break differs: under-trained entries sort by
//! ascending fatigue score (least fatigued first, since those have the most
//! headroom), every other status sorts by descending fatigue score (most
//! loaded first).
//!
//! # Two Bandings
//!
//! The whole-body average uses a different label scale than the per-muscle
//! readiness label ("Ready to train" / "Rest recommended" instead of
//! "Ready" / "Caution"). The scales are intentionally distinct and must not
//! be unified.

use serde::Serialize;
use std::cmp::Ordering;

use crate::models::{FatigueStatus, MuscleFatigue};
use crate::readiness::{readiness_with_config, Readiness, ReadinessConfig, Rgba};

/// Cap on the fatigued/freshest summary lists
const SUMMARY_CAP: usize = 3;

/// Whole-body average banding, evaluated top-down; lower bounds inclusive
const OVERALL_BANDS: &[(u8, &str, Rgba)] = &[
    (85, "Fresh", Rgba::new(34, 197, 94, 1.0)),
    (65, "Ready to train", Rgba::new(132, 204, 22, 1.0)),
    (45, "Rest recommended", Rgba::new(245, 158, 11, 1.0)),
    (0, "Needs rest", Rgba::new(239, 68, 68, 1.0)),
];

/// One muscle entry paired with its derived readiness
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MuscleReadiness {
    pub muscle: MuscleFatigue,
    pub readiness: Readiness,
}

/// Banded whole-body average readiness
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageReadiness {
    pub percent: u8,
    pub label: &'static str,
    pub color: Rgba,
}

/// The complete recovery view derived from one snapshot
///
/// Derived output only: serialized for export, never parsed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecoveryOverview {
    /// Full per-muscle set in display order
    pub ranked: Vec<MuscleReadiness>,

    /// Entry with the minimum readiness percent; None for empty input
    pub weakest_muscle: Option<MuscleReadiness>,

    /// Fatigued statuses only, ascending readiness, capped at 3
    pub fatigued_muscles: Vec<MuscleReadiness>,

    /// Optimal and under-trained only, descending readiness, capped at 3
    pub freshest_muscles: Vec<MuscleReadiness>,

    /// Rounded mean readiness across all entries; None for empty input
    pub average_readiness: Option<AverageReadiness>,
}

/// Display comparator: severity rank, then the per-status tie-break
fn display_order(a: &MuscleReadiness, b: &MuscleReadiness) -> Ordering {
    let by_severity = a
        .muscle
        .status
        .severity_rank()
        .cmp(&b.muscle.status.severity_rank());
    if by_severity != Ordering::Equal {
        return by_severity;
    }

    if a.muscle.status == FatigueStatus::UnderTrained {
        a.muscle.fatigue_score.total_cmp(&b.muscle.fatigue_score)
    } else {
        b.muscle.fatigue_score.total_cmp(&a.muscle.fatigue_score)
    }
}

/// Band the whole-body average (top-down table scan)
pub fn band_average(percent: u8) -> AverageReadiness {
    for (threshold, label, color) in OVERALL_BANDS {
        if percent >= *threshold {
            return AverageReadiness {
                percent,
                label,
                color: *color,
            };
        }
    }
    AverageReadiness {
        percent,
        label: "Needs rest",
        color: Rgba::new(239, 68, 68, 1.0),
    }
}

/// Rank a classified per-muscle set and derive the recovery summaries
///
/// Empty input is a defined case: empty list, `None` aggregates, no panic.
pub fn rank_muscles(per_muscle: &[MuscleFatigue], readiness: &ReadinessConfig) -> RecoveryOverview {
    let mut ranked: Vec<MuscleReadiness> = per_muscle
        .iter()
        .map(|muscle| MuscleReadiness {
            readiness: readiness_with_config(muscle.fatigue_score, readiness),
            muscle: muscle.clone(),
        })
        .collect();
    ranked.sort_by(display_order);

    let weakest_muscle = ranked
        .iter()
        .min_by_key(|entry| entry.readiness.percent)
        .cloned();

    let mut fatigued_muscles: Vec<MuscleReadiness> = ranked
        .iter()
        .filter(|entry| entry.muscle.status.is_fatigued())
        .cloned()
        .collect();
    fatigued_muscles.sort_by_key(|entry| entry.readiness.percent);
    fatigued_muscles.truncate(SUMMARY_CAP);

    let mut freshest_muscles: Vec<MuscleReadiness> = ranked
        .iter()
        .filter(|entry| {
            matches!(
                entry.muscle.status,
                FatigueStatus::Optimal | FatigueStatus::UnderTrained
            )
        })
        .cloned()
        .collect();
    freshest_muscles.sort_by_key(|entry| std::cmp::Reverse(entry.readiness.percent));
    freshest_muscles.truncate(SUMMARY_CAP);

    let average_readiness = if ranked.is_empty() {
        None
    } else {
        let sum: u32 = ranked.iter().map(|entry| entry.readiness.percent as u32).sum();
        let mean = (sum as f64 / ranked.len() as f64).round() as u8;
        Some(band_average(mean))
    };

    RecoveryOverview {
        ranked,
        weakest_muscle,
        fatigued_muscles,
        freshest_muscles,
        average_readiness,
    }
}
