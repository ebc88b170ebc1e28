//! Analysis Orchestrator - Sequences every analysis over one candidate set.
//!
//! The pipeline is fixed:
//!
//! 1. Pareto front and dominated report (always)
//! 2. Front tradeoffs (front of 2 or more)
//! 3. Ordering axis resolution: explicit, then structured-input hint, then
//!    auto-detection from a single minimizing criterion
//! 4. With an axis: sweet spots, traps, tier transitions, segment bests
//! 5. Without one: axis-less traps (kept only when non-empty) and the
//!    weighted ranking

use tracing::debug;

use super::{
    AnalysisError, AnalysisResult, AnalysisSummary, AxisDirection, CandidateSet, Criteria,
    DominanceAnalyzer, FrontTradeoffAnalyzer, GainAnalyzer, MinMax, OrderingAxis, SegmentFinder,
    TierAnalyzer, TrapDetector, WeightedRanker, DEFAULT_SWEET_SPOT_THRESHOLD,
    DEFAULT_TRAP_TOLERANCE,
};

/// Tunables for one `analyze` call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// Explicitly requested ordering axis.
    pub axis: Option<String>,
    /// Axis suggested by structured input (`cost_field`).
    pub axis_hint: Option<String>,
    /// Direction for an explicit or hinted axis. Auto-detected axes are
    /// always ascending.
    pub axis_direction: AxisDirection,
    /// Minimum gain score for a sweet spot.
    pub threshold: f64,
    /// Relative axis difference under which two candidates are compared
    /// for traps.
    pub tolerance: f64,
    /// Segment count; `None` derives it from the candidate count.
    pub num_segments: Option<usize>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            axis: None,
            axis_hint: None,
            axis_direction: AxisDirection::Asc,
            threshold: DEFAULT_SWEET_SPOT_THRESHOLD,
            tolerance: DEFAULT_TRAP_TOLERANCE,
            num_segments: None,
        }
    }
}

impl AnalysisOptions {
    /// Sets the explicit ordering axis.
    pub fn with_axis(mut self, name: impl Into<String>, direction: AxisDirection) -> Self {
        self.axis = Some(name.into());
        self.axis_direction = direction;
        self
    }

    /// Sets the structured-input axis hint.
    pub fn with_axis_hint(mut self, name: impl Into<String>) -> Self {
        self.axis_hint = Some(name.into());
        self
    }
}

/// Runs the full analysis pipeline.
///
/// # Errors
///
/// - `NoCriteria` if `criteria` is empty
/// - `SchemaMismatch` if `candidates` was not built for `criteria`
///
/// Degenerate inputs (empty set, flat axis, zero values) never fail; the
/// affected sections come back empty. An axis the schema does not carry
/// reads as 0 for every candidate, which is a flat axis.
pub fn analyze(
    candidates: &CandidateSet,
    criteria: &Criteria,
    options: &AnalysisOptions,
) -> Result<AnalysisResult, AnalysisError> {
    check_schema(candidates, criteria)?;
    let axis = resolve_axis(candidates, criteria, options);

    let items = candidates.as_slice();
    let crit = criteria.as_slice();

    let refs: Vec<_> = items.iter().collect();
    let front = DominanceAnalyzer::pareto_front(&refs, crit);
    let dominated = DominanceAnalyzer::dominated_report(items, crit, &front);
    debug!(
        total = items.len(),
        front = front.len(),
        dominated = dominated.len(),
        "Computed Pareto front"
    );

    let min_max = MinMax::compute(items, candidates.fields().len());
    let front_tradeoffs = FrontTradeoffAnalyzer::analyze(items, crit, &front, &min_max);

    let mut result = AnalysisResult {
        summary: AnalysisSummary::new(items.len(), front.len()),
        pareto_front_names: front.iter().map(|&i| candidates.name_of(i)).collect(),
        pareto_front: front,
        dominated,
        criteria_used: criteria.specs(),
        front_tradeoffs,
        sort_field: None,
        sort_direction: None,
        sort_field_auto_detected: false,
        sweet_spots: None,
        traps: None,
        tier_transitions: None,
        segment_bests: None,
        weighted_ranking: None,
    };

    match axis {
        Some(axis) => {
            debug!(
                axis = %axis.name,
                direction = ?axis.direction,
                auto_detected = axis.auto_detected,
                "Resolved ordering axis"
            );

            let sweet_spots = GainAnalyzer::detect_sweet_spots(
                items,
                crit,
                &axis,
                options.threshold,
            );
            let traps = TrapDetector::detect(items, crit, Some(&axis), options.tolerance);
            let tiers = TierAnalyzer::transitions(items, crit, &axis);
            let segments = SegmentFinder::find(items, crit, &axis, options.num_segments, &min_max);
            debug!(
                sweet_spots = sweet_spots.len(),
                traps = traps.len(),
                tier_transitions = tiers.len(),
                segments = segments.len(),
                "Completed axis analyses"
            );

            result.summary.sweet_spots_count = Some(sweet_spots.len());
            result.summary.traps_count = Some(traps.len());
            result.summary.segment_count = Some(segments.len());
            result.sort_field_auto_detected = axis.auto_detected;
            result.sort_direction = Some(axis.direction);
            result.sort_field = Some(axis.name);
            result.sweet_spots = Some(sweet_spots);
            result.traps = Some(traps);
            result.tier_transitions = Some(tiers);
            result.segment_bests = Some(segments);
        }
        None => {
            let traps = TrapDetector::detect(items, crit, None, options.tolerance);
            let ranking = WeightedRanker::rank(items, crit, &min_max);
            debug!(traps = traps.len(), "No ordering axis; ranked by composite score");

            if !traps.is_empty() {
                result.summary.traps_count = Some(traps.len());
                result.traps = Some(traps);
            }
            result.weighted_ranking = Some(ranking);
        }
    }

    Ok(result)
}

/// The candidate schema must start with the criteria names in order.
fn check_schema(candidates: &CandidateSet, criteria: &Criteria) -> Result<(), AnalysisError> {
    if criteria.is_empty() {
        return Err(AnalysisError::NoCriteria);
    }

    let fields = candidates.fields();
    for criterion in criteria {
        let found = fields.get(criterion.slot()).map(String::as_str).unwrap_or("");
        if found != criterion.name {
            return Err(AnalysisError::SchemaMismatch {
                expected: criterion.name.clone(),
                found: found.to_string(),
            });
        }
    }
    Ok(())
}

fn resolve_axis(
    candidates: &CandidateSet,
    criteria: &Criteria,
    options: &AnalysisOptions,
) -> Option<OrderingAxis> {
    let requested = options
        .axis
        .as_deref()
        .or(options.axis_hint.as_deref())
        .filter(|name| !name.is_empty());

    match requested {
        Some(name) => {
            // Past the last slot every candidate value reads as 0
            let slot = candidates
                .slot_of(name)
                .unwrap_or(candidates.fields().len());
            Some(OrderingAxis::new(name, slot, options.axis_direction))
        }
        None => criteria.auto_detect_axis().map(OrderingAxis::auto),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{CriterionSpec, RawRecord};

    fn cost_perf() -> Criteria {
        Criteria::new(vec![
            CriterionSpec::minimize("cost"),
            CriterionSpec::maximize("perf"),
        ])
        .unwrap()
    }

    fn perf_ram() -> Criteria {
        Criteria::new(vec![
            CriterionSpec::maximize("perf"),
            CriterionSpec::maximize("ram"),
        ])
        .unwrap()
    }

    #[test]
    fn front_and_dominated_partition_the_set() {
        let criteria = cost_perf();
        let set = CandidateSet::builder(&criteria)
            .row("A", [10.0, 50.0])
            .row("B", [20.0, 100.0])
            .row("C", [25.0, 40.0])
            .build();

        let result = analyze(&set, &criteria, &AnalysisOptions::default()).unwrap();

        assert_eq!(result.pareto_front, vec![0, 1]);
        assert_eq!(result.pareto_front_names, vec!["A", "B"]);
        assert_eq!(result.dominated.len(), 1);
        assert_eq!(result.dominated[0].index, 2);
        assert_eq!(result.summary.pareto_ratio, 0.667);
        assert_eq!(result.criteria_used, criteria.specs());
        assert!(result.front_tradeoffs.is_some());
    }

    #[test]
    fn single_minimizing_criterion_becomes_ascending_axis() {
        let criteria = cost_perf();
        let set = CandidateSet::builder(&criteria)
            .row("A", [10.0, 50.0])
            .row("B", [20.0, 100.0])
            .build();

        let result = analyze(&set, &criteria, &AnalysisOptions::default()).unwrap();

        assert_eq!(result.sort_field.as_deref(), Some("cost"));
        assert_eq!(result.sort_direction, Some(AxisDirection::Asc));
        assert!(result.sort_field_auto_detected);
        assert!(result.sweet_spots.is_some());
        assert!(result.tier_transitions.is_some());
        assert!(result.segment_bests.is_some());
        assert_eq!(result.summary.traps_count, Some(0));
        assert!(result.weighted_ranking.is_none());
    }

    #[test]
    fn no_axis_falls_back_to_weighted_ranking() {
        let criteria = perf_ram();
        let set = CandidateSet::builder(&criteria)
            .row("fast", [100.0, 8.0])
            .row("roomy", [50.0, 16.0])
            .build();

        let result = analyze(&set, &criteria, &AnalysisOptions::default()).unwrap();

        assert!(result.sort_field.is_none());
        assert!(!result.sort_field_auto_detected);
        assert!(result.sweet_spots.is_none());
        assert!(result.summary.sweet_spots_count.is_none());
        // No traps found, so the section is left out
        assert!(result.traps.is_none());
        assert!(result.summary.traps_count.is_none());
        assert_eq!(result.weighted_ranking.map(|r| r.len()), Some(2));
    }

    #[test]
    fn axisless_traps_are_reported_when_found() {
        let criteria = perf_ram();
        let set = CandidateSet::builder(&criteria)
            .row("weak", [10.0, 1.0])
            .row("strong", [100.0, 64.0])
            .build();

        let result = analyze(&set, &criteria, &AnalysisOptions::default()).unwrap();

        assert_eq!(result.summary.traps_count, Some(1));
        assert_eq!(result.traps.unwrap()[0].name, "weak");
    }

    #[test]
    fn explicit_axis_beats_hint_and_auto_detection() {
        let criteria = cost_perf();
        let set = CandidateSet::builder(&criteria)
            .row("A", [10.0, 50.0])
            .row("B", [20.0, 100.0])
            .build();
        let options = AnalysisOptions::default()
            .with_axis_hint("cost")
            .with_axis("perf", AxisDirection::Desc);

        let result = analyze(&set, &criteria, &options).unwrap();

        assert_eq!(result.sort_field.as_deref(), Some("perf"));
        assert_eq!(result.sort_direction, Some(AxisDirection::Desc));
        assert!(!result.sort_field_auto_detected);
    }

    #[test]
    fn hint_beats_auto_detection() {
        let criteria = Criteria::new(vec![
            CriterionSpec::minimize("cost"),
            CriterionSpec::maximize("perf"),
            CriterionSpec::maximize("watts"),
        ])
        .unwrap();
        let set = CandidateSet::builder(&criteria).row("A", [1.0, 2.0, 3.0]).build();
        let options = AnalysisOptions::default().with_axis_hint("watts");

        let result = analyze(&set, &criteria, &options).unwrap();

        assert_eq!(result.sort_field.as_deref(), Some("watts"));
        assert!(!result.sort_field_auto_detected);
    }

    #[test]
    fn axis_may_be_a_non_criterion_field() {
        let criteria = perf_ram();
        let record = |name: &str, perf: f64, ram: f64, price: f64| {
            RawRecord::new()
                .with_label("name", name)
                .with_field("perf", perf)
                .with_field("ram", ram)
                .with_field("price", price)
        };
        let records = vec![record("A", 10.0, 8.0, 100.0), record("B", 30.0, 16.0, 150.0)];
        let set = CandidateSet::from_records(&records, &criteria, "name", &["price".to_string()]);
        let options = AnalysisOptions::default().with_axis("price", AxisDirection::Asc);

        let result = analyze(&set, &criteria, &options).unwrap();

        assert_eq!(result.sort_field.as_deref(), Some("price"));
        let spots = result.sweet_spots.unwrap();
        assert_eq!(spots.len(), 1);
        assert_eq!(spots[0].name, "B");
        assert_eq!(spots[0].sort_value, 150.0);
    }

    #[test]
    fn axis_missing_from_schema_reads_as_flat_zero_axis() {
        let criteria = perf_ram();
        let set = CandidateSet::builder(&criteria)
            .row("weak", [1.0, 1.0])
            .row("strong", [10.0, 10.0])
            .build();
        let options = AnalysisOptions::default().with_axis_hint("price");

        let result = analyze(&set, &criteria, &options).unwrap();

        assert_eq!(result.sort_field.as_deref(), Some("price"));
        assert_eq!(result.sweet_spots, Some(vec![]));
        assert_eq!(result.tier_transitions, Some(vec![]));
        assert_eq!(result.segment_bests, Some(vec![]));
        let traps = result.traps.unwrap();
        assert_eq!(traps.len(), 1);
        assert_eq!(
            traps[0].reason,
            "Similar (price diff: 0), but worse: perf: 1->10; ram: 1->10"
        );
    }

    #[test]
    fn huge_segment_count_does_not_panic() {
        let criteria = cost_perf();
        let set = CandidateSet::builder(&criteria)
            .row("A", [10.0, 50.0])
            .row("B", [20.0, 100.0])
            .build();
        let options = AnalysisOptions {
            num_segments: Some(usize::MAX),
            ..AnalysisOptions::default()
        };

        let result = analyze(&set, &criteria, &options).unwrap();

        let segments = result.segment_bests.unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].best, "A");
        assert_eq!(segments[1].best, "B");
    }

    #[test]
    fn mismatched_schema_is_rejected() {
        let set = CandidateSet::builder(&perf_ram()).row("A", [1.0, 2.0]).build();

        let err = analyze(&set, &cost_perf(), &AnalysisOptions::default()).unwrap_err();

        assert!(matches!(err, AnalysisError::SchemaMismatch { .. }));
    }

    #[test]
    fn empty_set_reports_zeroes() {
        let criteria = cost_perf();
        let set = CandidateSet::builder(&criteria).build();

        let result = analyze(&set, &criteria, &AnalysisOptions::default()).unwrap();

        assert_eq!(result.summary.total, 0);
        assert_eq!(result.summary.pareto_ratio, 0.0);
        assert!(result.pareto_front.is_empty());
        assert!(result.front_tradeoffs.is_none());
        assert_eq!(result.sweet_spots, Some(vec![]));
        assert_eq!(result.segment_bests, Some(vec![]));
    }
}
