//! Gain Analyzer - Marginal gain ratios, gain scores and sweet spots.
//!
//! `marginal_gains` and `gain_score` are the single ratio primitive shared
//! by sweet-spot detection and tier transitions.

use serde::{Deserialize, Serialize};

use super::normalization::round_to;
use super::{AxisDirection, Candidate, Criterion, Direction, OrderingAxis};

/// Default gain score a sweet spot must reach.
pub const DEFAULT_SWEET_SPOT_THRESHOLD: f64 = 0.85;

/// Axis gaps below this fraction of the axis range are ignored as noise.
pub const MIN_GAP_FRACTION: f64 = 0.03;

/// Per-criterion ratios above this appear in sweet-spot reasons.
const REASON_RATIO_FLOOR: f64 = 1.1;

/// Raw ratio of one criterion between two candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginalGain {
    pub field: String,
    pub from: f64,
    pub to: f64,
    /// `to / from`, rounded to 3 decimals; `"inf"` in JSON when `from` is 0.
    #[serde(with = "super::unbounded")]
    pub ratio: f64,
}

/// A candidate whose gains outpace its move along the axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweetSpot {
    #[serde(rename = "config_index")]
    pub index: usize,
    pub name: String,
    pub sort_value: f64,
    #[serde(with = "super::unbounded")]
    pub gain_score: f64,
    pub compared_to_index: usize,
    pub compared_to_name: String,
    pub reason: String,
    pub marginal_gains: Vec<MarginalGain>,
}

/// `to / from`, with +inf when only `from` is 0 and 1.0 when both are.
pub fn raw_ratio(from: f64, to: f64) -> f64 {
    if from != 0.0 {
        to / from
    } else if to != 0.0 {
        f64::INFINITY
    } else {
        1.0
    }
}

/// Improvement ratio respecting direction; above 1.0 means `to` is better.
pub fn improvement_ratio(from: f64, to: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Maximize => raw_ratio(from, to),
        Direction::Minimize => raw_ratio(to, from),
    }
}

/// Per-criterion ratios between two candidates over every criterion.
pub fn marginal_gains(
    from: &Candidate,
    to: &Candidate,
    criteria: &[Criterion],
) -> Vec<MarginalGain> {
    criteria
        .iter()
        .map(|criterion| {
            let (v_from, v_to) = (from.get(criterion), to.get(criterion));
            MarginalGain {
                field: criterion.name.clone(),
                from: v_from,
                to: v_to,
                ratio: round_to(raw_ratio(v_from, v_to), 3),
            }
        })
        .collect()
}

/// Weighted improvement on non-axis criteria divided by the axis ratio.
///
/// Returns exactly 0.0 when the move is flat or backward along the axis,
/// or when the axis ratio is undefined (a zero endpoint). Rounded to 4
/// decimals; above 1.0 means the gains outpace the axis cost.
pub fn gain_score(
    from: &Candidate,
    to: &Candidate,
    criteria: &[Criterion],
    axis: &OrderingAxis,
) -> f64 {
    let (s_from, s_to) = (from.axis_value(axis), to.axis_value(axis));
    if !axis.is_forward(s_from, s_to) || s_from == 0.0 || s_to == 0.0 {
        return 0.0;
    }
    let axis_ratio = s_to.max(s_from) / s_to.min(s_from);

    let (weighted, total_weight) = criteria
        .iter()
        .filter(|c| c.slot() != axis.slot())
        .fold((0.0, 0.0), |(sum, total), c| {
            let ratio = improvement_ratio(from.get(c), to.get(c), c.direction);
            (sum + c.weight * ratio, total + c.weight)
        });

    let weighted_gain = if total_weight > 0.0 { weighted / total_weight } else { 0.0 };
    round_to(weighted_gain / axis_ratio, 4)
}

/// Candidate indices sorted along the axis; ties keep input order.
pub fn sort_along_axis(candidates: &[Candidate], axis: &OrderingAxis) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        let (va, vb) = (candidates[a].axis_value(axis), candidates[b].axis_value(axis));
        match axis.direction {
            AxisDirection::Asc => va.total_cmp(&vb),
            AxisDirection::Desc => vb.total_cmp(&va),
        }
    });
    order
}

/// Observed `(min, max)` along the axis, None for an empty set.
pub fn axis_bounds(candidates: &[Candidate], axis: &OrderingAxis) -> Option<(f64, f64)> {
    let mut values = candidates.iter().map(|c| c.axis_value(axis));
    let first = values.next()?;
    Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Sweet-spot detection along an ordering axis.
pub struct GainAnalyzer;

impl GainAnalyzer {
    /// Finds candidates whose best gain score against any earlier candidate
    /// reaches `threshold`, sorted by gain score descending.
    ///
    /// # Edge Cases
    /// - Fewer than 2 candidates: Returns empty Vec
    /// - Zero axis range: Returns empty Vec
    /// - Pairs closer than 3% of the axis range are skipped
    pub fn detect_sweet_spots(
        candidates: &[Candidate],
        criteria: &[Criterion],
        axis: &OrderingAxis,
        threshold: f64,
    ) -> Vec<SweetSpot> {
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
        let min_gap = range * MIN_GAP_FRACTION;

        let order = sort_along_axis(candidates, axis);
        let mut sweet_spots = Vec::new();

        for pos in 1..order.len() {
            let current = &candidates[order[pos]];
            let mut best_gain = 0.0;
            let mut best_from = order[0];

            for &prev_idx in &order[..pos] {
                let previous = &candidates[prev_idx];
                let gap = (current.axis_value(axis) - previous.axis_value(axis)).abs();
                if gap < min_gap {
                    continue;
                }
                let score = gain_score(previous, current, criteria, axis);
                if score > best_gain {
                    best_gain = score;
                    best_from = prev_idx;
                }
            }

            if best_gain >= threshold {
                let comparator = &candidates[best_from];
                let gains = marginal_gains(comparator, current, criteria);
                sweet_spots.push(SweetSpot {
                    index: current.index,
                    name: current.name.clone(),
                    sort_value: current.axis_value(axis),
                    gain_score: best_gain,
                    compared_to_index: comparator.index,
                    compared_to_name: comparator.name.clone(),
                    reason: Self::reason(best_gain, &gains),
                    marginal_gains: gains,
                });
            }
        }

        sweet_spots.sort_by(|a, b| b.gain_score.total_cmp(&a.gain_score));
        sweet_spots
    }

    /// `gain_score 1.23: perf:2.0x, ram:1.5x` from the top three ratios above 1.1.
    fn reason(gain: f64, gains: &[MarginalGain]) -> String {
        let mut top: Vec<&MarginalGain> = gains.iter().collect();
        top.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));

        let parts: Vec<String> = top
            .iter()
            .take(3)
            .filter(|g| g.ratio > REASON_RATIO_FLOOR)
            .map(|g| format!("{}:{:.1}x", g.field, g.ratio))
            .collect();

        format!("gain_score {:.2}: {}", gain, parts.join(", "))
    }
}
