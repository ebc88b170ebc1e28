//! Tier Transition Analyzer - Coarse "where do tiers change" summaries.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::gain_analyzer::{
    axis_bounds, gain_score, marginal_gains, sort_along_axis, MIN_GAP_FRACTION,
};
use super::normalization::round_to;
use super::{Candidate, Criterion, OrderingAxis};

/// Upper bound on the number of axis buckets.
pub const MAX_BUCKETS: usize = 15;

/// Ratios above this are key jumps.
const JUMP_UP: f64 = 1.2;

/// Positive ratios below this are key drops.
const JUMP_DOWN: f64 = 0.833;

/// A step between consecutive bucket representatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierTransition {
    #[serde(rename = "from_idx")]
    pub from_index: usize,
    #[serde(rename = "to_idx")]
    pub to_index: usize,
    pub from_name: String,
    pub to_name: String,
    /// Absolute axis difference, rounded to 4 decimals.
    pub delta: f64,
    /// Axis `to / from`, rounded to 3 decimals; 0 when `from` is 0.
    pub sort_ratio: f64,
    /// Criteria with disproportionate jumps, as `"<field>:<ratio>x"`.
    pub key_jumps: Vec<String>,
    #[serde(with = "super::unbounded")]
    pub gain_score: f64,
}

/// Tier transition analysis along an ordering axis.
pub struct TierAnalyzer;

impl TierAnalyzer {
    /// Buckets the axis, keeps the first candidate seen per bucket in axis
    /// order and reports each step between consecutive representatives.
    ///
    /// # Edge Cases
    /// - Fewer than 2 candidates: Returns empty Vec
    /// - Zero axis range: Returns empty Vec
    /// - Steps shorter than 3% of the axis range are skipped
    pub fn transitions(
        candidates: &[Candidate],
        criteria: &[Criterion],
        axis: &OrderingAxis,
    ) -> Vec<TierTransition> {
        if candidates.len() < 2 {
            return Vec::new();
        }
        let Some((lo, hi)) = axis_bounds(candidates, axis) else {
            return Vec::new();
        };
        let range = hi - lo;
        if range <= 0.0 {
            return Vec::new();
        }

        let representatives = Self::representatives(candidates, axis, range);
        let min_delta = range * MIN_GAP_FRACTION;

        representatives
            .windows(2)
            .filter_map(|pair| {
                let (from, to) = (&candidates[pair[0]], &candidates[pair[1]]);
                let (s_from, s_to) = (from.axis_value(axis), to.axis_value(axis));
                let delta = (s_to - s_from).abs();
                if delta < min_delta {
                    return None;
                }

                let sort_ratio = if s_from != 0.0 { s_to / s_from } else { 0.0 };
                let key_jumps = marginal_gains(from, to, criteria)
                    .into_iter()
                    .filter(|g| g.ratio > JUMP_UP || (g.ratio > 0.0 && g.ratio < JUMP_DOWN))
                    .map(|g| format!("{}:{:.1}x", g.field, g.ratio))
                    .collect();

                Some(TierTransition {
                    from_index: from.index,
                    to_index: to.index,
                    from_name: from.name.clone(),
                    to_name: to.name.clone(),
                    delta: round_to(delta, 4),
                    sort_ratio: round_to(sort_ratio, 3),
                    key_jumps,
                    gain_score: gain_score(from, to, criteria, axis),
                })
            })
            .collect()
    }

    /// One candidate per occupied bucket, in axis order.
    fn representatives(candidates: &[Candidate], axis: &OrderingAxis, range: f64) -> Vec<usize> {
        let bucket_count = MAX_BUCKETS.min(candidates.len());
        let bucket_size = range / bucket_count as f64;

        let mut seen = HashSet::new();
        sort_along_axis(candidates, axis)
            .into_iter()
            .filter(|&i| {
                let bucket = (candidates[i].axis_value(axis) / bucket_size).trunc() as i64;
                seen.insert(bucket)
            })
            .collect()
    }
}
