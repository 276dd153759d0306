//! Up-next recommendation matching and presentation state
//!
//! Decides how the "what to train next" card presents: start a matched
//! template one-tap, fall back to AI generation or manual creation, or show
//! the waiting/override/empty states. The matcher consumes the externally
//! produced recommendation and entitlement state; it never fabricates a
//! match and never tracks generation grants locally.
//!
//! # Match Cutoff
//!
//! A populated `matched_template` only counts as a match when its external
//! match score reaches 85. The cutoff is hard: 84.999 falls through to the
//! generate/create branch. The constant is a policy value carried verbatim.

use serde::Serialize;

use crate::models::{
    Entitlements, FatigueResult, MatchedTemplate, UpNextRecommendation,
};

/// Hard accept threshold for a template match (inclusive)
pub const MATCH_SCORE_THRESHOLD: f64 = 85.0;

/// Tags suppressed from the split chip row; the header's fatigue indicator
/// already renders this information
pub const SUPPRESSED_TAGS: [&str; 3] = ["Fresh", "High fatigue risk", "Recovering"];

/// Maximum number of split tags shown
pub const MAX_VISIBLE_TAGS: usize = 3;

/// Everything the matcher needs for one evaluation
#[derive(Debug, Clone, Default)]
pub struct UpNextInput {
    /// Recommendation fetch still in flight
    pub loading: bool,

    /// Fetch failed; surfaced by the caller, never retried here
    pub is_error: bool,

    /// The fetched recommendation, if any
    pub recommendation: Option<UpNextRecommendation>,

    /// Manually chosen template overriding the recommendation
    pub override_template: Option<MatchedTemplate>,

    /// Server-side entitlement state
    pub entitlements: Entitlements,
}

/// What tapping "Generate" does in the current entitlement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GenerateAction {
    /// Run the generation call
    Generate,
    /// Route to the upgrade flow instead
    Upgrade,
}

/// The four mutually exclusive presentation states
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UpNextState {
    /// Fetch in flight: waiting state, no action buttons
    Loading,

    /// Manual selection always wins; shown with a "Swap" escape hatch
    Override { template: MatchedTemplate },

    /// Fetch failed or nothing to recommend: onboarding call-to-action,
    /// independent of entitlement
    Empty,

    /// Strong template match: one-tap start plus an edit affordance
    Start {
        template: MatchedTemplate,
        visible_tags: Vec<String>,
    },

    /// No usable match: generate and create affordances
    GenerateOrCreate {
        /// Generate is styled primary when enabled; disabled taps route to
        /// the upgrade flow
        generate_enabled: bool,
        visible_tags: Vec<String>,
    },
}

impl UpNextState {
    /// Action behind the Generate affordance, if this state shows one
    pub fn generate_action(&self) -> Option<GenerateAction> {
        match self {
            UpNextState::GenerateOrCreate {
                generate_enabled, ..
            } => Some(if *generate_enabled {
                GenerateAction::Generate
            } else {
                GenerateAction::Upgrade
            }),
            _ => None,
        }
    }
}

/// Whether the recommendation carries a true template match
pub fn has_matched_template(recommendation: &UpNextRecommendation) -> bool {
    recommendation
        .matched_template
        .as_ref()
        .map(|template| template.match_score >= MATCH_SCORE_THRESHOLD)
        .unwrap_or(false)
}

/// Split tags minus the suppressed fatigue tags, capped for display
pub fn visible_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .filter(|tag| !SUPPRESSED_TAGS.contains(&tag.as_str()))
        .take(MAX_VISIBLE_TAGS)
        .cloned()
        .collect()
}

/// Evaluate the presentation state for one input
///
/// States are checked in priority order; each is terminal for the pass.
pub fn evaluate(input: &UpNextInput) -> UpNextState {
    if input.loading {
        return UpNextState::Loading;
    }

    if let Some(template) = &input.override_template {
        return UpNextState::Override {
            template: template.clone(),
        };
    }

    let recommendation = match (&input.recommendation, input.is_error) {
        (Some(recommendation), false) => recommendation,
        _ => return UpNextState::Empty,
    };

    let tags = visible_tags(&recommendation.recommended_split.tags);

    if has_matched_template(recommendation) {
        // Checked non-None by has_matched_template
        if let Some(template) = &recommendation.matched_template {
            return UpNextState::Start {
                template: template.clone(),
                visible_tags: tags,
            };
        }
    }

    UpNextState::GenerateOrCreate {
        generate_enabled: input.entitlements.is_pro || input.entitlements.can_generate_ai,
        visible_tags: tags,
    }
}

/// Build the free-text instruction for the external generation endpoint
///
/// Clauses, in order: prioritize under-trained groups, limit fatigued
/// groups, stay near baseline during a detected deload. Returns None when
/// no clause applies.
pub fn generation_instruction(result: &FatigueResult) -> Option<String> {
    let prioritize: Vec<&str> = result
        .per_muscle
        .iter()
        .filter(|muscle| muscle.under_trained)
        .map(|muscle| muscle.muscle_group.as_str())
        .collect();

    let limit: Vec<&str> = result
        .per_muscle
        .iter()
        .filter(|muscle| muscle.fatigued)
        .map(|muscle| muscle.muscle_group.as_str())
        .collect();

    let mut clauses = Vec::new();
    if !prioritize.is_empty() {
        clauses.push(format!("Prioritize: {}", prioritize.join(", ")));
    }
    if !limit.is_empty() {
        clauses.push(format!("Limit volume for: {}", limit.join(", ")));
    }
    if result.deload_week_detected {
        clauses.push("Stay near recent baseline volume".to_string());
    }

    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(". "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FatigueStatus, FatigueTotals, MuscleFatigue, RecommendedSplit};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn template(score: f64) -> MatchedTemplate {
        MatchedTemplate {
            template_id: Uuid::new_v4(),
            template_name: "Push Day A".to_string(),
            exercise_count: 6,
            match_score: score,
            match_reason: "Covers the recommended split".to_string(),
        }
    }

    fn recommendation(template: Option<MatchedTemplate>) -> UpNextRecommendation {
        UpNextRecommendation {
            recommended_split: RecommendedSplit {
                split_key: "push".to_string(),
                label: "Push".to_string(),
                tags: vec![
                    "Fresh".to_string(),
                    "Push focus".to_string(),
                    "Recovering".to_string(),
                ],
            },
            matched_template: template,
            fatigue_status: FatigueStatus::Optimal,
            can_generate_ai: false,
            reasoning: "Push muscles recovered".to_string(),
            days_since_last_split: Some(3),
        }
    }

    fn input(recommendation: Option<UpNextRecommendation>) -> UpNextInput {
        UpNextInput {
            loading: false,
            is_error: false,
            recommendation,
            override_template: None,
            entitlements: Entitlements::default(),
        }
    }

    #[test]
    fn test_loading_wins_over_everything() {
        let mut evaluated = input(Some(recommendation(Some(template(95.0)))));
        evaluated.loading = true;
        evaluated.override_template = Some(template(99.0));
        assert_eq!(evaluate(&evaluated), UpNextState::Loading);
    }

    #[test]
    fn test_override_beats_recommendation() {
        let mut evaluated = input(Some(recommendation(Some(template(95.0)))));
        evaluated.override_template = Some(template(10.0));
        match evaluate(&evaluated) {
            UpNextState::Override { template } => assert_eq!(template.match_score, 10.0),
            state => panic!("expected Override, got {:?}", state),
        }
    }

    #[test]
    fn test_error_and_absent_collapse_to_empty() {
        assert_eq!(evaluate(&input(None)), UpNextState::Empty);

        let mut errored = input(Some(recommendation(Some(template(95.0)))));
        errored.is_error = true;
        assert_eq!(evaluate(&errored), UpNextState::Empty);
    }

    #[test]
    fn test_strong_match_presents_start() {
        match evaluate(&input(Some(recommendation(Some(template(85.0)))))) {
            UpNextState::Start { template, .. } => assert_eq!(template.match_score, 85.0),
            state => panic!("expected Start, got {:?}", state),
        }
    }

    #[test]
    fn test_threshold_boundary_is_hard() {
        assert!(has_matched_template(&recommendation(Some(template(85.0)))));
        assert!(!has_matched_template(&recommendation(Some(template(
            84.999
        )))));
        assert!(!has_matched_template(&recommendation(None)));

        // 84.999 falls through to generate/create even though populated
        match evaluate(&input(Some(recommendation(Some(template(84.999)))))) {
            UpNextState::GenerateOrCreate { .. } => {}
            state => panic!("expected GenerateOrCreate, got {:?}", state),
        }
    }

    #[test]
    fn test_generate_gating_by_entitlement() {
        let free = input(Some(recommendation(None)));
        match evaluate(&free) {
            UpNextState::GenerateOrCreate {
                generate_enabled, ..
            } => assert!(!generate_enabled),
            state => panic!("expected GenerateOrCreate, got {:?}", state),
        }
        assert_eq!(
            evaluate(&free).generate_action(),
            Some(GenerateAction::Upgrade)
        );

        let mut pro = input(Some(recommendation(None)));
        pro.entitlements.is_pro = true;
        assert_eq!(
            evaluate(&pro).generate_action(),
            Some(GenerateAction::Generate)
        );

        // One-time grant enables generation without Pro
        let mut trial = input(Some(recommendation(None)));
        trial.entitlements.can_generate_ai = true;
        assert_eq!(
            evaluate(&trial).generate_action(),
            Some(GenerateAction::Generate)
        );
    }

    #[test]
    fn test_tag_suppression() {
        let tags = vec![
            "Fresh".to_string(),
            "Push focus".to_string(),
            "Recovering".to_string(),
        ];
        assert_eq!(visible_tags(&tags), vec!["Push focus".to_string()]);
    }

    #[test]
    fn test_tag_cap_after_suppression() {
        let tags = vec![
            "High fatigue risk".to_string(),
            "Push focus".to_string(),
            "Hypertrophy".to_string(),
            "45 min".to_string(),
            "Barbell".to_string(),
        ];
        assert_eq!(
            visible_tags(&tags),
            vec![
                "Push focus".to_string(),
                "Hypertrophy".to_string(),
                "45 min".to_string()
            ]
        );
    }

    fn snapshot(muscles: Vec<MuscleFatigue>, deload: bool) -> FatigueResult {
        FatigueResult {
            generated_at: Utc::now(),
            window_days: 7,
            baseline_weeks: 4,
            per_muscle: muscles,
            deload_week_detected: deload,
            readiness_score: 70.0,
            fresh_muscles: vec![],
            last_workout_at: None,
            totals: FatigueTotals::default(),
        }
    }

    fn muscle(group: &str, status: FatigueStatus) -> MuscleFatigue {
        MuscleFatigue {
            muscle_group: group.to_string(),
            last7_days_volume: dec!(5000),
            baseline_volume: Some(dec!(8000)),
            fatigue_score: 80.0,
            status,
            fatigued: status.is_fatigued(),
            under_trained: status == FatigueStatus::UnderTrained,
            baseline_missing: false,
            last_trained_at: None,
        }
    }

    #[test]
    fn test_generation_instruction_clauses() {
        let result = snapshot(
            vec![
                muscle("arms", FatigueStatus::UnderTrained),
                muscle("calves", FatigueStatus::UnderTrained),
                muscle("chest", FatigueStatus::HighFatigue),
                muscle("back", FatigueStatus::Optimal),
            ],
            true,
        );
        assert_eq!(
            generation_instruction(&result).unwrap(),
            "Prioritize: arms, calves. Limit volume for: chest. \
             Stay near recent baseline volume"
        );
    }

    #[test]
    fn test_generation_instruction_empty_when_nothing_applies() {
        let result = snapshot(vec![muscle("back", FatigueStatus::Optimal)], false);
        assert_eq!(generation_instruction(&result), None);
    }

    #[test]
    fn test_generation_instruction_deload_only() {
        let result = snapshot(vec![muscle("back", FatigueStatus::Optimal)], true);
        assert_eq!(
            generation_instruction(&result).unwrap(),
            "Stay near recent baseline volume"
        );
    }
}
