//! Segment-Best Finder - Best local-front candidate per axis segment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::gain_analyzer::axis_bounds;
use super::normalization::round_to;
use super::{Candidate, Criterion, DominanceAnalyzer, MinMax, OrderingAxis};

/// Bounds for the automatic segment count.
pub const MIN_SEGMENTS: usize = 3;
pub const MAX_SEGMENTS: usize = 8;

/// Winner of one axis segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentBest {
    /// `"<low>-<high>"` label.
    pub range: String,
    pub range_low: f64,
    pub range_high: f64,
    pub best_index: usize,
    pub best: String,
    pub composite_score: f64,
    /// Other local-front members of the segment.
    pub alternatives: Vec<String>,
    pub item_count: usize,
    pub reason: String,
}

/// Default segment count: `clamp(floor(sqrt(n)), 3, 8)`.
pub fn default_segment_count(n: usize) -> usize {
    ((n as f64).sqrt() as usize).clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

/// Per-segment best finder.
pub struct SegmentFinder;

impl SegmentFinder {
    /// Splits the axis range into equal-width segments and picks, in each
    /// non-empty one, the local Pareto-front member with the highest
    /// composite score.
    ///
    /// Local fronts and scores use the non-axis criteria, or all criteria
    /// when the axis is the only one. Ties go to the earliest index.
    ///
    /// # Edge Cases
    /// - Empty set or zero axis range: Returns empty Vec
    /// - Segment bounds are `low <= v < high`; the last also takes the maximum
    pub fn find(
        candidates: &[Candidate],
        criteria: &[Criterion],
        axis: &OrderingAxis,
        num_segments: Option<usize>,
        min_max: &MinMax,
    ) -> Vec<SegmentBest> {
        let Some((lo, hi)) = axis_bounds(candidates, axis) else {
            return Vec::new();
        };
        if hi <= lo {
            return Vec::new();
        }

        let segment_count = num_segments
            .unwrap_or_else(|| default_segment_count(candidates.len()))
            .max(1);
        let width = (hi - lo) / segment_count as f64;

        let non_axis: Vec<Criterion> = criteria
            .iter()
            .filter(|c| c.slot() != axis.slot())
            .cloned()
            .collect();
        let scoring: &[Criterion] = if non_axis.is_empty() { criteria } else { &non_axis };

        // Only occupied segments are materialized
        let mut members: BTreeMap<usize, Vec<&Candidate>> = BTreeMap::new();
        for candidate in candidates {
            let position = ((candidate.axis_value(axis) - lo) / width) as usize;
            members
                .entry(position.min(segment_count - 1))
                .or_default()
                .push(candidate);
        }

        members
            .iter()
            .filter_map(|(&seg_idx, segment)| {
                let seg_lo = lo + seg_idx as f64 * width;
                let seg_hi = seg_lo + width;

                let local_front: Vec<usize> = if non_axis.is_empty() {
                    segment.iter().map(|c| c.index).collect()
                } else {
                    DominanceAnalyzer::pareto_front(segment, &non_axis)
                };

                let (best_index, best_score) = Self::best_of(
                    candidates,
                    &local_front,
                    scoring,
                    min_max,
                )?;
                let best = &candidates[best_index];

                let alternatives = local_front
                    .iter()
                    .filter(|&&i| i != best_index)
                    .map(|&i| candidates[i].name.clone())
                    .collect();

                let (range_low, range_high) = (round_to(seg_lo, 4), round_to(seg_hi, 4));
                let label = format!("{}-{}", range_low, range_high);

                Some(SegmentBest {
                    reason: format!(
                        "Best composite score ({:.2}) in {} range {}",
                        best_score, axis.name, label
                    ),
                    range: label,
                    range_low,
                    range_high,
                    best_index,
                    best: best.name.clone(),
                    composite_score: best_score,
                    alternatives,
                    item_count: segment.len(),
                })
            })
            .collect()
    }

    /// Highest composite score among `indices`; the first wins ties.
    fn best_of(
        candidates: &[Candidate],
        indices: &[usize],
        criteria: &[Criterion],
        min_max: &MinMax,
    ) -> Option<(usize, f64)> {
        indices.iter().fold(None, |best, &i| {
            let score = min_max.composite_score(&candidates[i], criteria);
            match best {
                Some((_, best_score)) if score <= best_score => best,
                _ => Some((i, score)),
            }
        })
    }
}
