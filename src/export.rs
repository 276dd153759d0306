//! Snapshot export
//!
//! Writes a classified recovery view as flat per-muscle rows for offline
//! analysis, as CSV or JSON.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

use crate::fatigue::FatigueClassifier;
use crate::ranking::RecoveryOverview;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Result<Self, ExportError> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },
}

/// One flat export row per muscle group
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessRow {
    pub muscle_group: String,
    pub status: String,
    pub readiness_percent: u8,
    pub readiness_label: String,
    pub fatigue_score: f64,
    pub last7_days_volume: Decimal,
    pub baseline_volume: Option<Decimal>,
    pub hint: Option<String>,
}

/// Flatten a recovery view into export rows (display order preserved)
pub fn readiness_rows(overview: &RecoveryOverview) -> Vec<ReadinessRow> {
    overview
        .ranked
        .iter()
        .map(|entry| ReadinessRow {
            muscle_group: entry.muscle.muscle_group.clone(),
            status: entry.muscle.status.to_string(),
            readiness_percent: entry.readiness.percent,
            readiness_label: entry.readiness.label.to_string(),
            fatigue_score: entry.muscle.fatigue_score,
            last7_days_volume: entry.muscle.last7_days_volume,
            baseline_volume: entry.muscle.baseline_volume,
            hint: FatigueClassifier::hint_for_item(&entry.muscle).map(str::to_string),
        })
        .collect()
}

/// Write a recovery view to disk in the requested format
pub fn export_overview(
    overview: &RecoveryOverview,
    path: &Path,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let rows = readiness_rows(overview);
    let write_failed = |reason: String| ExportError::WriteFailed {
        path: path.display().to_string(),
        reason,
    };

    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)
                .map_err(|e| write_failed(e.to_string()))?;
            for row in &rows {
                writer
                    .serialize(row)
                    .map_err(|e| write_failed(e.to_string()))?;
            }
            writer.flush().map_err(|e| write_failed(e.to_string()))?;
        }
        ExportFormat::Json => {
            let file = File::create(path).map_err(|e| write_failed(e.to_string()))?;
            serde_json::to_writer_pretty(file, &rows)
                .map_err(|e| write_failed(e.to_string()))?;
        }
    }

    Ok(())
}
