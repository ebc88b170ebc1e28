//! Analysis result - The composite structure handed to renderers.
//!
//! Field names are stable; optional sections are omitted from serialized
//! output when the corresponding analysis did not run.

use serde::{Deserialize, Serialize};

use super::normalization::round_to;
use super::{
    AxisDirection, CriterionSpec, DominatedCandidate, FrontTradeoffs, RankedCandidate, SegmentBest,
    SweetSpot, TierTransition, Trap,
};

/// Headline counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total: usize,
    pub pareto_count: usize,
    /// `pareto_count / total`, rounded to 3 decimals; 0 for an empty set.
    pub pareto_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweet_spots_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traps_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_count: Option<usize>,
}

impl AnalysisSummary {
    /// Creates the summary with no optional counts.
    pub fn new(total: usize, pareto_count: usize) -> Self {
        let pareto_ratio = if total > 0 {
            round_to(pareto_count as f64 / total as f64, 3)
        } else {
            0.0
        };

        Self {
            total,
            pareto_count,
            pareto_ratio,
            sweet_spots_count: None,
            traps_count: None,
            segment_count: None,
        }
    }
}

/// Everything one `analyze` call produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: AnalysisSummary,
    /// Front indices in candidate-set order.
    pub pareto_front: Vec<usize>,
    pub pareto_front_names: Vec<String>,
    pub dominated: Vec<DominatedCandidate>,
    pub criteria_used: Vec<CriterionSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_tradeoffs: Option<FrontTradeoffs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<AxisDirection>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub sort_field_auto_detected: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweet_spots: Option<Vec<SweetSpot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traps: Option<Vec<Trap>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_transitions: Option<Vec<TierTransition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_bests: Option<Vec<SegmentBest>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_ranking: Option<Vec<RankedCandidate>>,
}

fn is_false(value: &bool) -> bool {
    !*value
}
