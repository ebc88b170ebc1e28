//! Weighted Ranker - Full composite-score ranking when no axis applies.

use serde::{Deserialize, Serialize};

use super::{Candidate, Criterion, MinMax};

/// One row of the weighted ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// 1-based position.
    pub rank: usize,
    pub index: usize,
    pub name: String,
    pub composite_score: f64,
}

/// Composite-score ranking.
pub struct WeightedRanker;

impl WeightedRanker {
    /// Ranks every candidate by composite score over all criteria, highest
    /// first. Equal scores keep input order.
    pub fn rank(
        candidates: &[Candidate],
        criteria: &[Criterion],
        min_max: &MinMax,
    ) -> Vec<RankedCandidate> {
        let mut scored: Vec<(&Candidate, f64)> = candidates
            .iter()
            .map(|c| (c, min_max.composite_score(c, criteria)))
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .enumerate()
            .map(|(pos, (candidate, score))| RankedCandidate {
                rank: pos + 1,
                index: candidate.index,
                name: candidate.name.clone(),
                composite_score: score,
            })
            .collect()
    }
}
