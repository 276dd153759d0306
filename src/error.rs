//! Unified error hierarchy for liftrs
//!
//! Provides a structured error type system with severity levels,
//! user-facing messages, and integration with the tracing system.
//!
//! Domain states are deliberately not errors: a missing baseline, an empty
//! snapshot, and a sub-threshold match score are all defined values in the
//! engine, never failures.

use std::path::PathBuf;
use thiserror::Error;

use crate::export::ExportError;
use crate::heatmap::HeatmapError;

/// Top-level error type for all liftrs operations
#[derive(Debug, Error)]
pub enum LiftRsError {
    /// Snapshot loading/decoding errors
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Heatmap bucketing errors
    #[error("Heatmap error: {0}")]
    Heatmap(#[from] HeatmapError),

    /// Export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Snapshot loading specific errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// File not found at specified path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Document failed to parse as a snapshot
    #[error("Decode failed: {reason}")]
    Decode { reason: String },

    /// Parsed but structurally unusable
    #[error("Invalid snapshot: {reason}")]
    Invalid { reason: String },
}

/// Result type alias for liftrs operations
pub type Result<T> = std::result::Result<T, LiftRsError>;

impl LiftRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LiftRsError::Snapshot(SnapshotError::FileNotFound { .. }) => ErrorSeverity::Warning,
            LiftRsError::Validation(_) => ErrorSeverity::Warning,
            LiftRsError::Snapshot(_) => ErrorSeverity::Error,
            LiftRsError::Heatmap(_) => ErrorSeverity::Error,
            LiftRsError::Export(_) => ErrorSeverity::Error,
            LiftRsError::Io(_) => ErrorSeverity::Error,
            LiftRsError::Configuration(_) => ErrorSeverity::Error,
            LiftRsError::Internal(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            LiftRsError::Snapshot(SnapshotError::FileNotFound { path }) => {
                format!("Could not find snapshot file: {}", path.display())
            }
            LiftRsError::Snapshot(SnapshotError::Decode { .. }) => {
                "Snapshot file is not valid JSON from the aggregation feed.".to_string()
            }
            LiftRsError::Snapshot(SnapshotError::Invalid { reason }) => {
                format!("Snapshot is unusable: {}", reason)
            }
            LiftRsError::Configuration(reason) => {
                format!("Configuration problem: {}. Run `liftrs config --init`.", reason)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = LiftRsError::Snapshot(SnapshotError::FileNotFound {
            path: PathBuf::from("/tmp/snapshot.json"),
        });
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = LiftRsError::Internal("unexpected".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_user_messages() {
        let err = LiftRsError::Snapshot(SnapshotError::FileNotFound {
            path: PathBuf::from("snapshot.json"),
        });
        assert!(err.user_message().contains("Could not find"));

        let err = LiftRsError::Configuration("missing file".to_string());
        assert!(err.user_message().contains("config --init"));
    }

    #[test]
    fn test_heatmap_error_converts() {
        let err: LiftRsError = HeatmapError::PaletteTooSmall(1).into();
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }
}
