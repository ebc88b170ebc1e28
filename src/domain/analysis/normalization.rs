//! Normalization - Direction-corrected 0-1 scaling and composite scores.

use serde::{Deserialize, Serialize};

use super::{Candidate, Criterion, Direction};

/// Observed bounds of one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Per-field min/max across a full candidate set.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMax {
    ranges: Vec<ValueRange>,
}

impl MinMax {
    /// Computes bounds for every schema slot.
    ///
    /// An empty candidate set yields `0..0` for every slot.
    pub fn compute(candidates: &[Candidate], field_count: usize) -> Self {
        let ranges = (0..field_count)
            .map(|slot| {
                let mut values = candidates.iter().map(|c| c.value(slot));
                match values.next() {
                    Some(first) => values.fold(ValueRange { min: first, max: first }, |r, v| {
                        ValueRange {
                            min: r.min.min(v),
                            max: r.max.max(v),
                        }
                    }),
                    None => ValueRange { min: 0.0, max: 0.0 },
                }
            })
            .collect();

        Self { ranges }
    }

    pub fn range(&self, slot: usize) -> ValueRange {
        self.ranges
            .get(slot)
            .copied()
            .unwrap_or(ValueRange { min: 0.0, max: 0.0 })
    }

    /// Normalized value of `candidate` on `criterion`; 1.0 is best.
    pub fn normalized(&self, candidate: &Candidate, criterion: &Criterion) -> f64 {
        let range = self.range(criterion.slot());
        normalize(candidate.get(criterion), range.min, range.max, criterion.direction)
    }

    /// Weighted composite score over `criteria`, rounded to 4 decimals.
    ///
    /// Returns 0.0 when the total weight is 0.
    pub fn composite_score(&self, candidate: &Candidate, criteria: &[Criterion]) -> f64 {
        let (weighted_sum, total_weight) = criteria.iter().fold((0.0, 0.0), |(sum, total), c| {
            (sum + c.weight * self.normalized(candidate, c), total + c.weight)
        });

        if total_weight > 0.0 {
            round_to(weighted_sum / total_weight, 4)
        } else {
            0.0
        }
    }
}

/// Maps `value` onto 0-1 where 1.0 always means best.
///
/// Returns 0.5 on a degenerate axis (`min == max`). Values outside the
/// bounds are clamped.
pub fn normalize(value: f64, min: f64, max: f64, direction: Direction) -> f64 {
    if max == min {
        return 0.5;
    }
    let scaled = ((value - min) / (max - min)).clamp(0.0, 1.0);
    match direction {
        Direction::Maximize => scaled,
        Direction::Minimize => 1.0 - scaled,
    }
}

/// Rounds to `decimals` places; infinities pass through unchanged.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
