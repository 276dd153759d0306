//! Muscle-group name normalization
//!
//! Upstream sources name muscles at different granularities ("trapezius",
//! "lats", "rear-delts"); the engine keys everything by a small set of
//! coarse groups. Normalization precedence is fixed:
//!
//! 1. Exact alias-table match (case-insensitive, trimmed)
//! 2. Substring heuristics, applied in table order, first match wins
//! 3. Identity (lowercased, trimmed)

use crate::models::FatigueResult;

/// Exact alias → coarse group
///
/// The coarse keys themselves lead the table so they never fall through to
/// the substring rules ("back" would otherwise trip the "ab" stem).
const ALIASES: &[(&str, &str)] = &[
    ("chest", "chest"),
    ("back", "back"),
    ("shoulders", "shoulders"),
    ("arms", "arms"),
    ("legs", "legs"),
    ("core", "core"),
    ("trapezius", "back"),
    ("traps", "back"),
    ("lats", "back"),
    ("latissimus dorsi", "back"),
    ("lower back", "back"),
    ("rhomboids", "back"),
    ("pecs", "chest"),
    ("pectorals", "chest"),
    ("rear-delts", "shoulders"),
    ("rear delts", "shoulders"),
    ("side-delts", "shoulders"),
    ("front-delts", "shoulders"),
    ("deltoids", "shoulders"),
    ("quads", "legs"),
    ("quadriceps", "legs"),
    ("hamstrings", "legs"),
    ("glutes", "legs"),
    ("calves", "legs"),
    ("adductors", "legs"),
    ("biceps", "arms"),
    ("triceps", "arms"),
    ("forearms", "arms"),
    ("abs", "core"),
    ("abdominals", "core"),
    ("obliques", "core"),
];

/// Substring fallbacks, checked in this order; more specific stems first so
/// "rear-delt" resolves before the "lat" stem can see "lateral"
const SUBSTRING_RULES: &[(&str, &str)] = &[
    ("delt", "shoulders"),
    ("quad", "legs"),
    ("hamstring", "legs"),
    ("glute", "legs"),
    ("calf", "legs"),
    ("trap", "back"),
    ("lat", "back"),
    ("pec", "chest"),
    ("bicep", "arms"),
    ("tricep", "arms"),
    ("forearm", "arms"),
    ("oblique", "core"),
    ("ab", "core"),
];

/// Normalize a muscle name onto its coarse group key
pub fn normalize_muscle_group(name: &str) -> String {
    let needle = name.trim().to_lowercase();

    for (alias, group) in ALIASES {
        if needle == *alias {
            return (*group).to_string();
        }
    }

    for (stem, group) in SUBSTRING_RULES {
        if needle.contains(*stem) {
            return (*group).to_string();
        }
    }

    needle
}

/// Canonicalize every muscle key in a snapshot
///
/// Feeds are expected to already use coarse keys; this catches stragglers.
/// Key uniqueness is re-checked by snapshot validation afterwards, since
/// normalization can collapse two fine-grained names onto one group.
pub fn normalize_result(result: &FatigueResult) -> FatigueResult {
    FatigueResult {
        per_muscle: result
            .per_muscle
            .iter()
            .map(|muscle| {
                let mut muscle = muscle.clone();
                muscle.muscle_group = normalize_muscle_group(&muscle.muscle_group);
                muscle
            })
            .collect(),
        fresh_muscles: result
            .fresh_muscles
            .iter()
            .map(|name| normalize_muscle_group(name))
            .collect(),
        ..result.clone()
    }
}
