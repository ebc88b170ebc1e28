//! Trap Detector - Near-identical axis value but clearly worse elsewhere.

use serde::{Deserialize, Serialize};

use super::normalization::round_to;
use super::{Candidate, Criterion, Direction, OrderingAxis};

/// Default relative axis difference under which two candidates are "close".
pub const DEFAULT_TRAP_TOLERANCE: f64 = 0.05;

/// Relative margin a criterion difference must exceed to count.
pub const RELATIVE_MARGIN: f64 = 0.1;

/// Minimum number of clearly-better criteria for a trap.
const MIN_WORSE_CRITERIA: usize = 2;

/// Floor for relative-difference denominators.
const REFERENCE_FLOOR: f64 = 1e-9;

/// A candidate that a close neighbour beats on several criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trap {
    pub index: usize,
    pub name: String,
    pub dominated_by_index: usize,
    pub dominated_by_name: String,
    pub reason: String,
}

/// Relative difference `(a - b) / max(|a|, |b|)`.
fn relative_gain(a: f64, b: f64) -> f64 {
    (a - b) / a.abs().max(b.abs()).max(REFERENCE_FLOOR)
}

/// Trap detection, with or without an ordering axis.
pub struct TrapDetector;

impl TrapDetector {
    /// Finds traps in index order.
    ///
    /// With an axis, only pairs within `tolerance` relative axis difference
    /// are compared and the axis itself is excluded. Without one, every pair
    /// is compared on all criteria. Candidate `i` is a trap of `j` when `j`
    /// is better by more than 10% on at least two criteria and `i` is better
    /// by more than 10% on none. The first matching `j` wins.
    pub fn detect(
        candidates: &[Candidate],
        criteria: &[Criterion],
        axis: Option<&OrderingAxis>,
        tolerance: f64,
    ) -> Vec<Trap> {
        let compared: Vec<&Criterion> = criteria
            .iter()
            .filter(|c| axis.map_or(true, |a| c.slot() != a.slot()))
            .collect();

        let mut traps = Vec::new();

        for candidate in candidates {
            for other in candidates {
                if candidate.index == other.index {
                    continue;
                }
                if let Some(axis) = axis {
                    let (vi, vj) = (candidate.axis_value(axis), other.axis_value(axis));
                    if relative_gain(vi, vj).abs() > tolerance {
                        continue;
                    }
                }

                if let Some(details) = Self::clearly_worse(candidate, other, &compared) {
                    traps.push(Trap {
                        index: candidate.index,
                        name: candidate.name.clone(),
                        dominated_by_index: other.index,
                        dominated_by_name: other.name.clone(),
                        reason: Self::reason(candidate, other, axis, &details),
                    });
                    break;
                }
            }
        }

        traps
    }

    /// Transitions where `other` clearly beats `candidate`, if it is a trap.
    fn clearly_worse(
        candidate: &Candidate,
        other: &Candidate,
        criteria: &[&Criterion],
    ) -> Option<Vec<String>> {
        let mut details = Vec::new();
        let mut candidate_better = 0;

        for criterion in criteria {
            let (ci, cj) = (candidate.get(criterion), other.get(criterion));
            let (other_gain, own_gain) = match criterion.direction {
                Direction::Maximize => (relative_gain(cj, ci), relative_gain(ci, cj)),
                Direction::Minimize => (relative_gain(ci, cj), relative_gain(cj, ci)),
            };
            if other_gain > RELATIVE_MARGIN {
                details.push(format!("{}: {}->{}", criterion.name, ci, cj));
            } else if own_gain > RELATIVE_MARGIN {
                candidate_better += 1;
            }
        }

        (details.len() >= MIN_WORSE_CRITERIA && candidate_better == 0).then_some(details)
    }

    fn reason(
        candidate: &Candidate,
        other: &Candidate,
        axis: Option<&OrderingAxis>,
        details: &[String],
    ) -> String {
        let axis_info = axis
            .map(|axis| {
                let diff = (candidate.axis_value(axis) - other.axis_value(axis)).abs();
                format!(" ({} diff: {})", axis.name, round_to(diff, 4))
            })
            .unwrap_or_default();

        format!("Similar{}, but worse: {}", axis_info, details.join("; "))
    }
}
