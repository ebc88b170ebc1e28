//! Analysis configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analysis::{
    AxisDirection, DEFAULT_SWEET_SPOT_THRESHOLD, DEFAULT_TRAP_TOLERANCE,
};

/// Largest accepted explicit segment count
pub const MAX_SEGMENT_COUNT: usize = 64;

/// Analysis defaults, overridable per run from the command line
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSettings {
    /// Minimum gain score for a sweet spot
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Relative axis difference under which candidates are compared for traps
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Record field holding the display name
    #[serde(default = "default_name_field")]
    pub name_field: String,

    /// Direction of an explicitly chosen ordering axis
    #[serde(default)]
    pub sort_direction: AxisDirection,

    /// Segment count for segment bests; derived from the set size when unset
    pub num_segments: Option<usize>,
}

/// Per-run values that replace the configured defaults when present
#[derive(Debug, Clone, Default)]
pub struct AnalysisOverrides {
    pub threshold: Option<f64>,
    pub tolerance: Option<f64>,
    pub name_field: Option<String>,
    pub sort_direction: Option<AxisDirection>,
    pub num_segments: Option<usize>,
}

impl AnalysisSettings {
    /// Apply per-run overrides. The result still needs [`Self::validate`].
    pub fn with_overrides(self, overrides: AnalysisOverrides) -> Self {
        Self {
            threshold: overrides.threshold.unwrap_or(self.threshold),
            tolerance: overrides.tolerance.unwrap_or(self.tolerance),
            name_field: overrides.name_field.unwrap_or(self.name_field),
            sort_direction: overrides.sort_direction.unwrap_or(self.sort_direction),
            num_segments: overrides.num_segments.or(self.num_segments),
        }
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ValidationError::InvalidThreshold);
        }
        if !(0.0..=1.0).contains(&self.tolerance) {
            return Err(ValidationError::InvalidTolerance);
        }
        if self.name_field.trim().is_empty() {
            return Err(ValidationError::MissingRequired("analysis.name_field"));
        }
        if let Some(n) = self.num_segments {
            if n == 0 || n > MAX_SEGMENT_COUNT {
                return Err(ValidationError::InvalidSegmentCount {
                    max: MAX_SEGMENT_COUNT,
                });
            }
        }
        Ok(())
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            tolerance: default_tolerance(),
            name_field: default_name_field(),
            sort_direction: AxisDirection::default(),
            num_segments: None,
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_SWEET_SPOT_THRESHOLD
}

fn default_tolerance() -> f64 {
    DEFAULT_TRAP_TOLERANCE
}

fn default_name_field() -> String {
    "name".to_string()
}
