//! Front Tradeoff Analyzer - Strengths, weaknesses and pairwise wins on the front.

use serde::{Deserialize, Serialize};

use super::{Candidate, Criterion, MinMax};

/// Normalized value at or above which a criterion is a strength.
pub const STRENGTH_THRESHOLD: f64 = 0.8;

/// Normalized value at or below which a criterion is a weakness.
pub const WEAKNESS_THRESHOLD: f64 = 0.2;

/// Strengths and weaknesses of a single front member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontProfile {
    pub index: usize,
    pub name: String,
    /// Criteria where the normalized value is at least 0.8.
    pub strengths: Vec<String>,
    /// Criteria where the normalized value is at most 0.2.
    pub weaknesses: Vec<String>,
}

impl FrontProfile {
    /// Returns true if nothing stands out either way.
    pub fn is_balanced(&self) -> bool {
        self.strengths.is_empty() && self.weaknesses.is_empty()
    }
}

/// Who wins where between two front members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseTradeoff {
    pub a_index: usize,
    pub a: String,
    pub b_index: usize,
    pub b: String,
    pub a_better_at: Vec<String>,
    pub b_better_at: Vec<String>,
}

/// Tradeoff summary for the whole front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontTradeoffs {
    pub items: Vec<FrontProfile>,
    pub pairwise: Vec<PairwiseTradeoff>,
}

/// Analyzer for tradeoffs among non-dominated candidates.
pub struct FrontTradeoffAnalyzer;

impl FrontTradeoffAnalyzer {
    /// Summarizes the front.
    ///
    /// # Edge Cases
    /// - Front of 0 or 1 members: Returns None (nothing to trade off)
    /// - Pair tied on every criterion: omitted from `pairwise`
    pub fn analyze(
        candidates: &[Candidate],
        criteria: &[Criterion],
        front: &[usize],
        min_max: &MinMax,
    ) -> Option<FrontTradeoffs> {
        if front.len() < 2 {
            return None;
        }

        let members: Vec<&Candidate> = front.iter().filter_map(|&i| candidates.get(i)).collect();

        let items = members
            .iter()
            .map(|member| Self::profile(member, criteria, min_max))
            .collect();

        let mut pairwise = Vec::new();
        for (pos, a) in members.iter().enumerate() {
            for b in &members[pos + 1..] {
                if let Some(tradeoff) = Self::compare(a, b, criteria) {
                    pairwise.push(tradeoff);
                }
            }
        }

        Some(FrontTradeoffs { items, pairwise })
    }

    fn profile(candidate: &Candidate, criteria: &[Criterion], min_max: &MinMax) -> FrontProfile {
        let mut strengths = Vec::new();
        let mut weaknesses = Vec::new();

        for criterion in criteria {
            let norm = min_max.normalized(candidate, criterion);
            if norm >= STRENGTH_THRESHOLD {
                strengths.push(criterion.name.clone());
            } else if norm <= WEAKNESS_THRESHOLD {
                weaknesses.push(criterion.name.clone());
            }
        }

        FrontProfile {
            index: candidate.index,
            name: candidate.name.clone(),
            strengths,
            weaknesses,
        }
    }

    fn compare(a: &Candidate, b: &Candidate, criteria: &[Criterion]) -> Option<PairwiseTradeoff> {
        let mut a_better_at = Vec::new();
        let mut b_better_at = Vec::new();

        for criterion in criteria {
            let (va, vb) = (a.get(criterion), b.get(criterion));
            if criterion.is_better(va, vb) {
                a_better_at.push(criterion.name.clone());
            } else if criterion.is_better(vb, va) {
                b_better_at.push(criterion.name.clone());
            }
        }

        if a_better_at.is_empty() && b_better_at.is_empty() {
            return None;
        }

        Some(PairwiseTradeoff {
            a_index: a.index,
            a: a.name.clone(),
            b_index: b.index,
            b: b.name.clone(),
            a_better_at,
            b_better_at,
        })
    }
}
