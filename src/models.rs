//! Core value objects for the recovery and recommendation engine
//!
//! Everything in this module is a value object: produced wholesale by the
//! upstream aggregation feed (or derived from it), immutable once received,
//! and superseded in full by the next snapshot. No incremental patching.
//!
//! Wire format matches the upstream JSON feed (camelCase keys). Volume totals
//! use `Decimal` to avoid floating-point drift when loads are summed and
//! compared against baselines; the fatigue score itself is a continuous
//! server-computed scalar and stays `f64`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use crate::error::{LiftRsError, Result};

/// Discrete per-muscle fatigue status
///
/// Mutually exclusive and exhaustive. `NoData` covers both "never trained"
/// and "no volume inside the rolling window" — it is not reserved for the
/// missing-baseline case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FatigueStatus {
    /// Recent volume well below baseline; capacity to absorb more work
    UnderTrained,
    /// Volume and recovery in balance
    Optimal,
    /// Elevated fatigue; reduce intensity
    ModerateFatigue,
    /// High fatigue; rest needed before loading again
    HighFatigue,
    /// No volume inside the rolling window
    NoData,
}

impl FatigueStatus {
    /// Severity rank used as the primary display sort key (lower = shown first)
    pub fn severity_rank(&self) -> u8 {
        match self {
            FatigueStatus::HighFatigue => 0,
            FatigueStatus::ModerateFatigue => 1,
            FatigueStatus::Optimal => 2,
            FatigueStatus::UnderTrained => 3,
            FatigueStatus::NoData => 4,
        }
    }

    /// True for the two statuses that count as fatigued
    pub fn is_fatigued(&self) -> bool {
        matches!(
            self,
            FatigueStatus::ModerateFatigue | FatigueStatus::HighFatigue
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            FatigueStatus::UnderTrained => "Under-trained",
            FatigueStatus::Optimal => "Optimal",
            FatigueStatus::ModerateFatigue => "Moderate fatigue",
            FatigueStatus::HighFatigue => "High fatigue",
            FatigueStatus::NoData => "No data",
        }
    }
}

impl Default for FatigueStatus {
    fn default() -> Self {
        FatigueStatus::NoData
    }
}

impl fmt::Display for FatigueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-muscle aggregates for one evaluation window
///
/// The volume fields and `fatigue_score` come from the upstream aggregation;
/// `status` and the three derived booleans are (re)computed by the fatigue
/// classifier and default to their empty values when the feed omits them.
///
/// Invariant after classification: `fatigued` is true exactly when `status`
/// is `moderate-fatigue` or `high-fatigue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuscleFatigue {
    /// Stable muscle-group key ("chest", "back", ...)
    pub muscle_group: String,

    /// Total load inside the rolling window
    pub last7_days_volume: Decimal,

    /// Typical load over the longer reference window; absent until enough
    /// history exists
    pub baseline_volume: Option<Decimal>,

    /// Server-computed training-stress scalar; higher means more fatigued
    pub fatigue_score: f64,

    /// Discrete status derived by the classifier
    #[serde(default)]
    pub status: FatigueStatus,

    /// Status is moderate-fatigue or high-fatigue
    #[serde(default)]
    pub fatigued: bool,

    /// Status is under-trained
    #[serde(default)]
    pub under_trained: bool,

    /// No baseline yet for this muscle group
    #[serde(default)]
    pub baseline_missing: bool,

    /// Most recent session touching this muscle group
    #[serde(default)]
    pub last_trained_at: Option<DateTime<Utc>>,
}

/// Aggregate totals carried alongside the per-muscle breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FatigueTotals {
    pub total_volume: Decimal,
    pub total_sets: u32,
    pub workout_count: u32,
}

/// One evaluation snapshot from the aggregation feed
///
/// `window_days` and `baseline_weeks` are fixed per result; a change requires
/// a full refetch, never an in-place update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FatigueResult {
    pub generated_at: DateTime<Utc>,

    /// Rolling window length for `last7_days_volume`
    pub window_days: u16,

    /// Reference window length for `baseline_volume`
    pub baseline_weeks: u16,

    /// One entry per tracked muscle group, keys unique
    pub per_muscle: Vec<MuscleFatigue>,

    /// Deload flagged upstream; passed through unchanged
    #[serde(default)]
    pub deload_week_detected: bool,

    /// Whole-body fatigue scalar from the same aggregation
    pub readiness_score: f64,

    /// Muscle groups the upstream feed considers fresh
    #[serde(default)]
    pub fresh_muscles: Vec<String>,

    #[serde(default)]
    pub last_workout_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub totals: FatigueTotals,
}

impl FatigueResult {
    /// Validate snapshot invariants: unique muscle keys, non-negative volumes
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for muscle in &self.per_muscle {
            if !seen.insert(muscle.muscle_group.as_str()) {
                return Err(LiftRsError::Validation(format!(
                    "duplicate muscle group in snapshot: {}",
                    muscle.muscle_group
                )));
            }
            if muscle.last7_days_volume.is_sign_negative() {
                return Err(LiftRsError::Validation(format!(
                    "negative window volume for {}: {}",
                    muscle.muscle_group, muscle.last7_days_volume
                )));
            }
            if let Some(baseline) = muscle.baseline_volume {
                if baseline.is_sign_negative() {
                    return Err(LiftRsError::Validation(format!(
                        "negative baseline volume for {}: {}",
                        muscle.muscle_group, baseline
                    )));
                }
            }
        }
        Ok(())
    }

    /// Look up a muscle group by key
    pub fn muscle(&self, key: &str) -> Option<&MuscleFatigue> {
        self.per_muscle.iter().find(|m| m.muscle_group == key)
    }
}

/// Recommended split from the external rotation/recency policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedSplit {
    /// Stable split key ("push", "pull", "legs", ...)
    pub split_key: String,

    /// Display label
    pub label: String,

    /// Free-form descriptive tags; filtered before display
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A saved template scored against the recommended split
///
/// The match-scoring algorithm is external; this engine only consumes the
/// resulting score and applies the hard 85-point cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedTemplate {
    pub template_id: Uuid,
    pub template_name: String,
    pub exercise_count: u16,

    /// External confidence (0-100) that the template satisfies the split
    pub match_score: f64,

    pub match_reason: String,
}

/// "Up next" recommendation consumed from the external producer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpNextRecommendation {
    pub recommended_split: RecommendedSplit,

    /// Best-scoring saved template, if any. Populated does not mean matched:
    /// the matcher treats entries below the cutoff as absent.
    #[serde(default)]
    pub matched_template: Option<MatchedTemplate>,

    /// Whole-body fatigue status at recommendation time
    #[serde(default)]
    pub fatigue_status: FatigueStatus,

    /// One-time server-side generation grant for non-Pro users
    #[serde(default)]
    pub can_generate_ai: bool,

    /// Producer's human-readable rationale
    #[serde(default)]
    pub reasoning: String,

    #[serde(default)]
    pub days_since_last_split: Option<u32>,
}

/// Entitlement state from the server-side oracle
///
/// `can_generate_ai` is a boolean grant, not a counter. It is re-fetched on
/// every evaluation and never decremented locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Entitlements {
    pub is_pro: bool,
    pub can_generate_ai: bool,
}
