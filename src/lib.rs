// Library interface for the liftrs engine modules
// This allows integration tests to access the core functionality

pub mod config;
pub mod debounce;
pub mod error;
pub mod export;
pub mod fatigue;
pub mod heatmap;
pub mod logging;
pub mod models;
pub mod muscles;
pub mod ranking;
pub mod readiness;
pub mod upnext;

// Re-export commonly used types for convenience
pub use models::*;
pub use debounce::{SelectionDebouncer, SELECTION_DEBOUNCE};
pub use error::{LiftRsError, Result};
pub use export::{export_overview, readiness_rows, ExportFormat};
pub use fatigue::{ClassifierConfig, FatigueClassifier};
pub use heatmap::{assign_buckets, fatigue_to_intensity, heatmap_input, DEFAULT_PALETTE_SIZE};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use muscles::{normalize_muscle_group, normalize_result};
pub use ranking::{rank_muscles, RecoveryOverview};
pub use readiness::{readiness_from_fatigue_score, Readiness, ReadinessConfig, ReadinessLabel};
pub use upnext::{
    evaluate, generation_instruction, has_matched_template, visible_tags, UpNextInput, UpNextState,
    MATCH_SCORE_THRESHOLD,
};
