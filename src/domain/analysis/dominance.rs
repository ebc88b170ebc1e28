//! Dominance Engine - Pareto front and dominated-item explanations.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Candidate, Criterion};

/// Maximum number of dominators reported per dominated candidate.
pub const MAX_REPORTED_DOMINATORS: usize = 3;

/// A front member that dominates some candidate, with its advantages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dominator {
    pub index: usize,
    pub name: String,
    /// Criteria where the dominator is strictly better, as `"<criterion>: <from>-><to>"`.
    pub advantages: Vec<String>,
}

/// A candidate that is not on the Pareto front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominatedCandidate {
    pub index: usize,
    pub name: String,
    pub dominated_by: Vec<Dominator>,
}

/// Pareto dominance functions.
pub struct DominanceAnalyzer;

impl DominanceAnalyzer {
    /// Returns true if `b` dominates `a`.
    ///
    /// `b` dominates `a` when `b` is at least as good on every criterion and
    /// strictly better on at least one.
    ///
    /// # Edge Cases
    /// - Identical candidates: neither dominates
    /// - A candidate never dominates itself
    pub fn is_dominated(a: &Candidate, b: &Candidate, criteria: &[Criterion]) -> bool {
        let mut strictly_better_on_one = false;

        for criterion in criteria {
            let va = a.get(criterion);
            let vb = b.get(criterion);

            if criterion.is_better(va, vb) {
                return false;
            }
            if criterion.is_better(vb, va) {
                strictly_better_on_one = true;
            }
        }

        strictly_better_on_one
    }

    /// Indices of candidates no other candidate dominates, in input order.
    ///
    /// Indices are `Candidate::index` values, so this works on any subset.
    /// Ties on every criterion leave all tied candidates on the front.
    pub fn pareto_front(candidates: &[&Candidate], criteria: &[Criterion]) -> Vec<usize> {
        candidates
            .iter()
            .enumerate()
            .filter(|(i, candidate)| {
                !candidates
                    .iter()
                    .enumerate()
                    .any(|(j, other)| *i != j && Self::is_dominated(candidate, other, criteria))
            })
            .map(|(_, candidate)| candidate.index)
            .collect()
    }

    /// Explains every candidate not on `front`.
    ///
    /// Front members are scanned in front order and at most
    /// `MAX_REPORTED_DOMINATORS` are kept per dominated candidate.
    pub fn dominated_report(
        candidates: &[Candidate],
        criteria: &[Criterion],
        front: &[usize],
    ) -> Vec<DominatedCandidate> {
        let front_set: HashSet<usize> = front.iter().copied().collect();

        candidates
            .iter()
            .filter(|c| !front_set.contains(&c.index))
            .map(|candidate| {
                let dominated_by = front
                    .iter()
                    .filter_map(|&j| candidates.get(j))
                    .filter(|dominator| Self::is_dominated(candidate, dominator, criteria))
                    .take(MAX_REPORTED_DOMINATORS)
                    .map(|dominator| Dominator {
                        index: dominator.index,
                        name: dominator.name.clone(),
                        advantages: Self::advantages(candidate, dominator, criteria),
                    })
                    .collect();

                DominatedCandidate {
                    index: candidate.index,
                    name: candidate.name.clone(),
                    dominated_by,
                }
            })
            .collect()
    }

    /// Criteria where `dominator` is strictly better than `candidate`.
    fn advantages(
        candidate: &Candidate,
        dominator: &Candidate,
        criteria: &[Criterion],
    ) -> Vec<String> {
        criteria
            .iter()
            .filter_map(|criterion| {
                let from = candidate.get(criterion);
                let to = dominator.get(criterion);
                criterion
                    .is_better(to, from)
                    .then(|| format!("{}: {}->{}", criterion.name, from, to))
            })
            .collect()
    }
}
