//! Readiness scoring and display color interpolation
//!
//! Converts the server-computed fatigue score into the 0-100 readiness
//! percentage shown throughout the app, a qualitative label, and a
//! continuously interpolated display color.
//!
//! # Scoring Background
//!
//! The fatigue score is an opaque training-stress scalar where higher means
//! more fatigued. The transform is linear and anchored at two points:
//!
//! - A score of 70 maps to 100% readiness (fully rested reference point)
//! - Readiness drops 1.2 points per point of fatigue above 70
//!
//! The constants (`120`, `70`, `1.2`) are policy values, not derived from
//! data. They are carried in [`ReadinessConfig`] so the scale can be retuned
//! without touching the transform, and the defaults are the behavioral
//! contract.
//!
//! Readiness is never persisted: it is recomputed on every evaluation from
//! the fatigue score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy constants for the linear fatigue-to-readiness transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadinessConfig {
    /// Intercept of the linear transform
    pub ceiling: f64,

    /// Fatigue score that maps to 100% readiness
    pub rested_score: f64,

    /// Readiness points lost per fatigue point above `rested_score`
    pub slope: f64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        ReadinessConfig {
            ceiling: 120.0,
            rested_score: 70.0,
            slope: 1.2,
        }
    }
}

/// Qualitative readiness label for a single muscle group
///
/// Note this banding is intentionally distinct from the whole-body average
/// banding in the ranking module; the two scales must not be unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessLabel {
    Fresh,
    Ready,
    Caution,
    Fatigued,
}

impl ReadinessLabel {
    pub fn label(&self) -> &'static str {
        match self {
            ReadinessLabel::Fresh => "Fresh",
            ReadinessLabel::Ready => "Ready",
            ReadinessLabel::Caution => "Caution",
            ReadinessLabel::Fatigued => "Fatigued",
        }
    }

    /// Discrete badge color for this band
    pub fn color(&self) -> Rgba {
        LABEL_BANDS
            .iter()
            .find(|(_, label, _)| label == self)
            .map(|(_, _, color)| *color)
            .unwrap_or(Rgba::new(239, 68, 68, 1.0))
    }
}

impl fmt::Display for ReadinessLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// RGBA display color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    /// Linear interpolation between two colors
    ///
    /// Uses the `(1-t)*a + t*b` form so that `t = 0` and `t = 1` reproduce
    /// the endpoints exactly, channel for channel.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let mix = |a: f32, b: f32| a * (1.0 - t) + b * t;
        Rgba {
            r: mix(self.r as f32, other.r as f32).round() as u8,
            g: mix(self.g as f32, other.g as f32).round() as u8,
            b: mix(self.b as f32, other.b as f32).round() as u8,
            a: mix(self.a, other.a),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, self.a)
    }
}

/// Per-muscle label banding, evaluated top-down; lower bounds are inclusive
const LABEL_BANDS: &[(u8, ReadinessLabel, Rgba)] = &[
    (85, ReadinessLabel::Fresh, Rgba::new(34, 197, 94, 1.0)),
    (65, ReadinessLabel::Ready, Rgba::new(132, 204, 22, 1.0)),
    (45, ReadinessLabel::Caution, Rgba::new(245, 158, 11, 1.0)),
    (0, ReadinessLabel::Fatigued, Rgba::new(239, 68, 68, 1.0)),
];

/// Red-gradient stops at readiness 0, 25, 50, 75, 100
///
/// Low readiness renders as saturated dark red; high readiness fades toward
/// a pale wash. Segment interpolation shares these endpoints, which is what
/// makes the gradient continuous at the band boundaries.
const GRADIENT_STOPS: [Rgba; 5] = [
    Rgba::new(127, 29, 29, 0.95),
    Rgba::new(185, 28, 28, 0.85),
    Rgba::new(239, 68, 68, 0.70),
    Rgba::new(248, 113, 113, 0.50),
    Rgba::new(254, 202, 202, 0.30),
];

/// Width of each gradient segment in readiness points
const SEGMENT_WIDTH: u8 = 25;

/// Derived readiness for one muscle group; never persisted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readiness {
    /// Integer readiness percentage, always within 0-100
    pub percent: u8,

    /// Qualitative band for the percentage
    pub label: ReadinessLabel,

    /// Interpolated gradient color for the percentage
    pub color: Rgba,
}

/// Convert a fatigue score to readiness using the default policy constants
pub fn readiness_from_fatigue_score(score: f64) -> Readiness {
    readiness_with_config(score, &ReadinessConfig::default())
}

/// Convert a fatigue score to readiness with explicit policy constants
pub fn readiness_with_config(score: f64, config: &ReadinessConfig) -> Readiness {
    let percent = percent_from_score(score, config);
    Readiness {
        percent,
        label: label_for_percent(percent),
        color: color_for_percent(percent),
    }
}

/// The linear transform: `clamp(ceiling - (score - rested) * slope, 0, 100)`
pub fn percent_from_score(score: f64, config: &ReadinessConfig) -> u8 {
    let raw = config.ceiling - (score - config.rested_score) * config.slope;
    raw.clamp(0.0, 100.0).round() as u8
}

/// Band a percentage into its qualitative label (top-down table scan)
pub fn label_for_percent(percent: u8) -> ReadinessLabel {
    for (threshold, label, _) in LABEL_BANDS {
        if percent >= *threshold {
            return *label;
        }
    }
    ReadinessLabel::Fatigued
}

/// Interpolate the display color for a percentage
pub fn color_for_percent(percent: u8) -> Rgba {
    let percent = percent.min(100);
    // Segment index for bands [0,25], (25,50], (50,75], (75,100]
    let segment = if percent == 0 {
        0
    } else {
        ((percent - 1) / SEGMENT_WIDTH) as usize
    };
    interpolate_segment(segment.min(3), percent)
}

/// Interpolate within one gradient segment
fn interpolate_segment(segment: usize, percent: u8) -> Rgba {
    let start = (segment as u8) * SEGMENT_WIDTH;
    let t = (percent - start) as f32 / SEGMENT_WIDTH as f32;
    GRADIENT_STOPS[segment].lerp(GRADIENT_STOPS[segment + 1], t)
}
