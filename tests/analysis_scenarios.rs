//! End-to-end analysis scenarios through the public API.
//!
//! Covers the canonical dominance scenarios, the trap margin boundary, a
//! full axis pipeline and loading from JSON, YAML and CSV files.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use pareto_decide::adapters::SerdeInputLoader;
use pareto_decide::application::{InputSource, RunAnalysisCommand, RunAnalysisHandler};
use pareto_decide::domain::analysis::{
    analyze, AnalysisOptions, AnalysisResult, CandidateSet, Criteria, CriterionSpec,
};
use pareto_decide::domain::foundation::ErrorCode;

// =============================================================================
// Helpers
// =============================================================================

fn cost_perf() -> Criteria {
    Criteria::new(vec![
        CriterionSpec::minimize("cost"),
        CriterionSpec::maximize("perf"),
    ])
    .unwrap()
}

fn cost_perf_ram() -> Criteria {
    Criteria::new(vec![
        CriterionSpec::minimize("cost"),
        CriterionSpec::maximize("perf"),
        CriterionSpec::maximize("ram"),
    ])
    .unwrap()
}

fn run(set: &CandidateSet, criteria: &Criteria) -> AnalysisResult {
    analyze(set, criteria, &AnalysisOptions::default()).unwrap()
}

// =============================================================================
// Dominance scenarios
// =============================================================================

#[test]
fn candidate_worse_than_both_neighbours_is_dominated_by_both() {
    let criteria = cost_perf();
    let set = CandidateSet::builder(&criteria)
        .row("A", [10.0, 50.0])
        .row("B", [20.0, 100.0])
        .row("C", [25.0, 40.0])
        .build();

    let result = run(&set, &criteria);

    assert_eq!(result.pareto_front, vec![0, 1]);
    assert_eq!(result.dominated.len(), 1);
    let c = &result.dominated[0];
    assert_eq!(c.name, "C");
    let dominators: Vec<&str> = c.dominated_by.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(dominators, vec!["A", "B"]);
    assert_eq!(c.dominated_by[0].advantages, vec!["cost: 25->10", "perf: 40->50"]);
    assert_eq!(c.dominated_by[1].advantages, vec!["cost: 25->20", "perf: 40->100"]);
}

#[test]
fn midpoint_tradeoff_stays_on_front() {
    // Cheaper than B and faster than A: nobody is at least as good everywhere
    let criteria = cost_perf();
    let set = CandidateSet::builder(&criteria)
        .row("A", [10.0, 50.0])
        .row("B", [20.0, 100.0])
        .row("C", [15.0, 60.0])
        .build();

    let result = run(&set, &criteria);

    assert_eq!(result.pareto_front, vec![0, 1, 2]);
    assert!(result.dominated.is_empty());
}

#[test]
fn single_criterion_front_is_the_maximum() {
    let criteria = Criteria::new(vec![CriterionSpec::maximize("perf")]).unwrap();
    let set = CandidateSet::builder(&criteria)
        .row("A", [3.0])
        .row("B", [7.0])
        .row("C", [5.0])
        .build();

    let result = run(&set, &criteria);

    assert_eq!(result.pareto_front_names, vec!["B"]);
    assert_eq!(result.dominated.len(), 2);
    for dominated in &result.dominated {
        let names: Vec<&str> = dominated.dominated_by.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["B"]);
    }
    assert!(result.front_tradeoffs.is_none());
}

#[test]
fn identical_candidates_all_stay_on_front() {
    let criteria = cost_perf();
    let set = CandidateSet::builder(&criteria)
        .row("A", [5.0, 5.0])
        .row("B", [5.0, 5.0])
        .row("C", [5.0, 5.0])
        .build();

    let result = run(&set, &criteria);

    assert_eq!(result.pareto_front, vec![0, 1, 2]);
    assert!(result.dominated.is_empty());
    assert_eq!(result.summary.pareto_ratio, 1.0);
    // Flat axis: nothing to say along it
    assert_eq!(result.sweet_spots, Some(vec![]));
    assert_eq!(result.tier_transitions, Some(vec![]));
    assert_eq!(result.segment_bests, Some(vec![]));
    assert_eq!(result.traps, Some(vec![]));
    // Fully tied pairs produce no pairwise entries
    assert!(result.front_tradeoffs.unwrap().pairwise.is_empty());
}

#[test]
fn empty_set_is_not_an_error() {
    let criteria = cost_perf();
    let set = CandidateSet::builder(&criteria).build();

    let result = run(&set, &criteria);

    assert_eq!(result.summary.total, 0);
    assert_eq!(result.summary.pareto_count, 0);
    assert_eq!(result.summary.pareto_ratio, 0.0);
    assert!(result.pareto_front.is_empty());
}

// =============================================================================
// Trap margin boundary
// =============================================================================

#[test]
fn ten_to_eleven_is_below_the_trap_margin() {
    // (11 - 10) / 11 is about 0.091, not above 0.1
    let criteria = cost_perf_ram();
    let set = CandidateSet::builder(&criteria)
        .row("X", [100.0, 10.0, 10.0])
        .row("Y", [101.0, 11.0, 11.0])
        .build();

    let result = run(&set, &criteria);

    assert_eq!(result.traps, Some(vec![]));
    assert_eq!(result.summary.traps_count, Some(0));
}

#[test]
fn exact_ten_percent_is_not_a_trap() {
    let criteria = cost_perf_ram();
    let set = CandidateSet::builder(&criteria)
        .row("X", [100.0, 9.0, 9.0])
        .row("Y", [101.0, 10.0, 10.0])
        .build();

    let result = run(&set, &criteria);

    assert_eq!(result.summary.traps_count, Some(0));
}

#[test]
fn just_over_ten_percent_is_a_trap() {
    let criteria = cost_perf_ram();
    let set = CandidateSet::builder(&criteria)
        .row("X", [100.0, 9.0, 9.0])
        .row("Y", [101.0, 10.1, 10.1])
        .build();

    let result = run(&set, &criteria);

    let traps = result.traps.unwrap();
    assert_eq!(traps.len(), 1);
    assert_eq!(traps[0].name, "X");
    assert_eq!(traps[0].dominated_by_name, "Y");
    assert_eq!(
        traps[0].reason,
        "Similar (cost diff: 1), but worse: perf: 9->10.1; ram: 9->10.1"
    );
}

#[test]
fn single_non_axis_criterion_never_traps() {
    let criteria = cost_perf();
    let set = CandidateSet::builder(&criteria)
        .row("X", [100.0, 10.0])
        .row("Y", [101.0, 50.0])
        .build();

    let result = run(&set, &criteria);

    assert_eq!(result.summary.traps_count, Some(0));
}

// =============================================================================
// Axis pipeline
// =============================================================================

#[test]
fn axis_pipeline_reports_sweet_spots_tiers_and_segments() {
    let criteria = cost_perf();
    let set = CandidateSet::builder(&criteria)
        .row("entry", [100.0, 10.0])
        .row("value", [110.0, 30.0])
        .row("flagship", [300.0, 35.0])
        .build();

    let result = run(&set, &criteria);

    assert_eq!(result.sort_field.as_deref(), Some("cost"));
    assert!(result.sort_field_auto_detected);
    assert_eq!(result.pareto_front, vec![0, 1, 2]);

    let spots = result.sweet_spots.unwrap();
    let names: Vec<&str> = spots.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["value", "flagship"]);
    assert_eq!(spots[0].gain_score, 2.7273);
    assert_eq!(spots[0].compared_to_name, "entry");
    assert_eq!(spots[0].reason, "gain_score 2.73: perf:3.0x");
    assert_eq!(spots[1].gain_score, 1.1667);
    assert_eq!(spots[1].compared_to_name, "entry");

    let tiers = result.tier_transitions.unwrap();
    assert_eq!(tiers.len(), 1);
    assert_eq!((tiers[0].from_name.as_str(), tiers[0].to_name.as_str()), ("entry", "flagship"));
    assert_eq!(tiers[0].sort_ratio, 3.0);
    assert_eq!(tiers[0].key_jumps, vec!["cost:3.0x", "perf:3.5x"]);

    let segments = result.segment_bests.unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].best, "value");
    assert!(segments[0].alternatives.is_empty());
    assert_eq!(segments[0].item_count, 2);
    assert_eq!(segments[1].best, "flagship");

    assert_eq!(result.summary.sweet_spots_count, Some(2));
    assert_eq!(result.summary.segment_count, Some(2));
}

#[test]
fn analysis_is_idempotent() {
    let criteria = cost_perf_ram();
    let set = CandidateSet::builder(&criteria)
        .row("a", [100.0, 9.0, 9.0])
        .row("b", [101.0, 10.1, 10.1])
        .row("c", [150.0, 30.0, 12.0])
        .row("d", [400.0, 31.0, 64.0])
        .build();

    let first = run(&set, &criteria);
    let second = run(&set, &criteria);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn serialized_result_uses_stable_field_names() {
    let criteria = cost_perf();
    let set = CandidateSet::builder(&criteria)
        .row("A", [10.0, 50.0])
        .row("B", [20.0, 100.0])
        .build();

    let json = serde_json::to_value(run(&set, &criteria)).unwrap();

    for key in [
        "summary",
        "pareto_front",
        "pareto_front_names",
        "dominated",
        "criteria_used",
        "front_tradeoffs",
        "sort_field",
        "sort_direction",
        "sort_field_auto_detected",
        "sweet_spots",
        "traps",
        "tier_transitions",
        "segment_bests",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert!(json.get("weighted_ranking").is_none());
    assert_eq!(json["sort_direction"], "asc");
    assert_eq!(json["criteria_used"][0]["direction"], "minimize");
}

// =============================================================================
// Loading from files
// =============================================================================

fn handler() -> RunAnalysisHandler {
    RunAnalysisHandler::new(Arc::new(SerdeInputLoader::new()))
}

#[test]
fn runs_json_file_with_flag_criteria() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gpus.json");
    fs::write(
        &path,
        r#"[
            {"name": "A", "cost": 10, "perf": 50},
            {"name": "B", "cost": 20, "perf": 100},
            {"name": "C", "cost": 25, "perf": 40}
        ]"#,
    )
    .unwrap();

    let mut cmd = RunAnalysisCommand::new(InputSource::Path(path));
    cmd.criteria = Some("cost:min,perf:max".to_string());

    let run = handler().handle(cmd).unwrap();

    assert_eq!(run.result.pareto_front_names, vec!["A", "B"]);
    assert_eq!(run.result.dominated[0].name, "C");
}

#[test]
fn runs_structured_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gpus.yml");
    fs::write(
        &path,
        "configs:\n\
         \x20 - {sku: small, price: 100, tflops: 10}\n\
         \x20 - {sku: large, price: 200, tflops: 40}\n\
         criteria:\n\
         \x20 - {name: tflops, direction: max}\n\
         cost_field: price\n",
    )
    .unwrap();

    let mut cmd = RunAnalysisCommand::new(InputSource::Path(path));
    cmd.name_field = "sku".to_string();

    let run = handler().handle(cmd).unwrap();

    assert_eq!(run.result.sort_field.as_deref(), Some("price"));
    assert_eq!(run.result.pareto_front_names, vec!["large"]);
    assert_eq!(run.result.sweet_spots.unwrap()[0].name, "large");
}

#[test]
fn runs_csv_file_with_flag_criteria() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gpus.csv");
    fs::write(&path, "name,cost,perf\nA,10,50\nB,20,100\nC,25,40\n").unwrap();

    let mut cmd = RunAnalysisCommand::new(InputSource::Path(path));
    cmd.criteria = Some("cost:min,perf:max".to_string());

    let run = handler().handle(cmd).unwrap();

    assert_eq!(run.result.pareto_front_names, vec!["A", "B"]);
    assert_eq!(run.result.dominated[0].name, "C");
    assert_eq!(run.result.sort_field.as_deref(), Some("cost"));
}

#[test]
fn missing_file_reports_unreadable_input() {
    let dir = TempDir::new().unwrap();
    let mut cmd = RunAnalysisCommand::new(InputSource::Path(dir.path().join("none.json")));
    cmd.maximize = vec!["perf".to_string()];

    let err = handler().handle(cmd).unwrap_err();

    assert_eq!(err.code, ErrorCode::InputUnreadable);
}
