//! Analysis Module - Pure domain services for Pareto decision analysis.
//!
//! This module contains stateless functions that operate on a candidate set
//! and its criteria to explain trade-offs among discrete configurations.
//!
//! # Components
//!
//! - `Criteria` / `OrderingAxis` - Named evaluation axes and the ordering axis
//! - `CandidateSet` - Fixed-schema arena of candidate records
//! - `DominanceAnalyzer` - Pareto front and dominated-item explanations
//! - `MinMax` - Direction-corrected normalization and composite scores
//! - `FrontTradeoffAnalyzer` - Strengths, weaknesses and pairwise wins on the front
//! - `GainAnalyzer` - Marginal gains, gain scores and sweet spots
//! - `TrapDetector` - Close on the axis, clearly worse elsewhere
//! - `TierAnalyzer` - Coarse tier transitions along the axis
//! - `SegmentFinder` - Best local-front candidate per axis segment
//! - `WeightedRanker` - Composite-score ranking when no axis applies
//! - `analyze` - Runs the whole pipeline
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They take domain
//! objects as input and return computed results. No ports or adapters needed
//! since there's no I/O or external dependencies.

mod candidate;
mod criteria_builder;
mod criterion;
mod dominance;
mod errors;
mod front_tradeoffs;
mod gain_analyzer;
mod normalization;
mod orchestrator;
mod ranking;
mod result;
mod segment_finder;
mod tier_analyzer;
mod trap_detector;
mod unbounded;

// Re-export all public types
pub use candidate::{Candidate, CandidateSet, CandidateSetBuilder, RawRecord};
pub use criteria_builder::{
    parse_criteria_arg, parse_field_list, parse_weights_arg, CriteriaBuilder, StructuredMeta,
};
pub use criterion::{AxisDirection, Criteria, Criterion, CriterionSpec, Direction, OrderingAxis};
pub use dominance::{DominanceAnalyzer, DominatedCandidate, Dominator, MAX_REPORTED_DOMINATORS};
pub use errors::AnalysisError;
pub use front_tradeoffs::{
    FrontProfile, FrontTradeoffAnalyzer, FrontTradeoffs, PairwiseTradeoff, STRENGTH_THRESHOLD,
    WEAKNESS_THRESHOLD,
};
pub use gain_analyzer::{
    gain_score, improvement_ratio, marginal_gains, raw_ratio, GainAnalyzer, MarginalGain, SweetSpot,
    DEFAULT_SWEET_SPOT_THRESHOLD, MIN_GAP_FRACTION,
};
pub use normalization::{normalize, round_to, MinMax, ValueRange};
pub use orchestrator::{analyze, AnalysisOptions};
pub use ranking::{RankedCandidate, WeightedRanker};
pub use result::{AnalysisResult, AnalysisSummary};
pub use segment_finder::{
    default_segment_count, SegmentBest, SegmentFinder, MAX_SEGMENTS, MIN_SEGMENTS,
};
pub use tier_analyzer::{TierAnalyzer, TierTransition, MAX_BUCKETS};
pub use trap_detector::{Trap, TrapDetector, DEFAULT_TRAP_TOLERANCE, RELATIVE_MARGIN};
