//! Criterion Model - Named evaluation axes with direction and weight.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::AnalysisError;

/// Which way a criterion improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[serde(alias = "max")]
    Maximize,
    #[serde(alias = "min")]
    Minimize,
}

impl Direction {
    /// Parses `max`/`maximize`/`min`/`minimize` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" | "maximize" => Some(Direction::Maximize),
            "min" | "minimize" => Some(Direction::Minimize),
            _ => None,
        }
    }

    /// Returns true if `a` is strictly better than `b` in this direction.
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Maximize => a > b,
            Direction::Minimize => a < b,
        }
    }

    /// Returns the label used in serialized output.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Maximize => "maximize",
            Direction::Minimize => "minimize",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Orientation of the ordering axis.
///
/// `Asc`: higher values are further along (more expensive).
/// `Desc`: lower values are further along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisDirection {
    #[default]
    Asc,
    Desc,
}

impl AxisDirection {
    /// Parses `asc` or `desc` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(AxisDirection::Asc),
            "desc" => Some(AxisDirection::Desc),
            _ => None,
        }
    }
}

/// Criterion as supplied by a caller or structured input.
///
/// Direction defaults to maximize and weight to 1.0 when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionSpec {
    pub name: String,
    #[serde(default = "default_direction")]
    pub direction: Direction,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl CriterionSpec {
    /// Creates a spec with weight 1.0.
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
            weight: default_weight(),
        }
    }

    /// Creates a maximizing spec with weight 1.0.
    pub fn maximize(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Maximize)
    }

    /// Creates a minimizing spec with weight 1.0.
    pub fn minimize(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Minimize)
    }

    /// Replaces the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

fn default_direction() -> Direction {
    Direction::Maximize
}

fn default_weight() -> f64 {
    1.0
}

/// A validated criterion bound to its slot in the candidate schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    pub name: String,
    pub direction: Direction,
    pub weight: f64,
    slot: usize,
}

impl Criterion {
    /// Position of this criterion's value in every candidate record.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Returns true if `a` is strictly better than `b` on this criterion.
    pub fn is_better(&self, a: f64, b: f64) -> bool {
        self.direction.is_better(a, b)
    }

    /// Returns the spec this criterion was built from.
    pub fn spec(&self) -> CriterionSpec {
        CriterionSpec {
            name: self.name.clone(),
            direction: self.direction,
            weight: self.weight,
        }
    }
}

/// Ordered, non-empty list of criteria with unique names.
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    items: Vec<Criterion>,
}

impl Criteria {
    /// Validates the specs and binds each criterion to its slot.
    ///
    /// # Errors
    /// - `NoCriteria` if `specs` is empty
    /// - `DuplicateCriterion` if a name repeats
    /// - `InvalidWeight` if a weight is not finite and positive
    pub fn new(specs: Vec<CriterionSpec>) -> Result<Self, AnalysisError> {
        if specs.is_empty() {
            return Err(AnalysisError::NoCriteria);
        }

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(specs.len());

        for (slot, spec) in specs.into_iter().enumerate() {
            if !seen.insert(spec.name.clone()) {
                return Err(AnalysisError::DuplicateCriterion(spec.name));
            }
            if !spec.weight.is_finite() || spec.weight <= 0.0 {
                return Err(AnalysisError::InvalidWeight {
                    name: spec.name,
                    weight: spec.weight,
                });
            }
            items.push(Criterion {
                name: spec.name,
                direction: spec.direction,
                weight: spec.weight,
                slot,
            });
        }

        Ok(Self { items })
    }

    pub fn as_slice(&self) -> &[Criterion] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Criterion> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a criterion by name.
    pub fn get(&self, name: &str) -> Option<&Criterion> {
        self.items.iter().find(|c| c.name == name)
    }

    /// Criterion names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|c| c.name.as_str()).collect()
    }

    /// All criteria except the one occupying `slot`.
    pub fn without_slot(&self, slot: usize) -> Vec<Criterion> {
        self.items.iter().filter(|c| c.slot != slot).cloned().collect()
    }

    /// Specs in declaration order, as echoed back in results.
    pub fn specs(&self) -> Vec<CriterionSpec> {
        self.items.iter().map(Criterion::spec).collect()
    }

    /// Picks the axis when exactly one criterion is minimized.
    ///
    /// Any other mix (no minimizing criterion, or several) yields `None`.
    pub fn auto_detect_axis(&self) -> Option<&Criterion> {
        let mut minimizing = self
            .items
            .iter()
            .filter(|c| c.direction == Direction::Minimize);
        match (minimizing.next(), minimizing.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a Criteria {
    type Item = &'a Criterion;
    type IntoIter = std::slice::Iter<'a, Criterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The criterion designated as the independent variable for gain, trap,
/// tier and segment analyses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingAxis {
    pub name: String,
    pub direction: AxisDirection,
    pub auto_detected: bool,
    slot: usize,
}

impl OrderingAxis {
    /// Creates an axis bound to a schema slot.
    pub fn new(name: impl Into<String>, slot: usize, direction: AxisDirection) -> Self {
        Self {
            name: name.into(),
            direction,
            auto_detected: false,
            slot,
        }
    }

    /// Creates an auto-detected ascending axis from a minimizing criterion.
    pub fn auto(criterion: &Criterion) -> Self {
        Self {
            name: criterion.name.clone(),
            direction: AxisDirection::Asc,
            auto_detected: true,
            slot: criterion.slot,
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Returns true if moving from `from` to `to` goes forward along the axis.
    pub fn is_forward(&self, from: f64, to: f64) -> bool {
        match self.direction {
            AxisDirection::Asc => to > from,
            AxisDirection::Desc => to < from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost_perf() -> Criteria {
        Criteria::new(vec![
            CriterionSpec::minimize("cost"),
            CriterionSpec::maximize("perf"),
        ])
        .unwrap()
    }

    #[test]
    fn direction_parse_accepts_short_and_long_forms() {
        assert_eq!(Direction::parse("max"), Some(Direction::Maximize));
        assert_eq!(Direction::parse("Maximize"), Some(Direction::Maximize));
        assert_eq!(Direction::parse(" MIN "), Some(Direction::Minimize));
        assert_eq!(Direction::parse("minimize"), Some(Direction::Minimize));
        assert_eq!(Direction::parse("up"), None);
    }

    #[test]
    fn direction_is_better_respects_orientation() {
        assert!(Direction::Maximize.is_better(2.0, 1.0));
        assert!(!Direction::Maximize.is_better(1.0, 1.0));
        assert!(Direction::Minimize.is_better(1.0, 2.0));
        assert!(!Direction::Minimize.is_better(2.0, 2.0));
    }

    #[test]
    fn criteria_assigns_slots_in_declaration_order() {
        let criteria = cost_perf();
        assert_eq!(criteria.get("cost").unwrap().slot(), 0);
        assert_eq!(criteria.get("perf").unwrap().slot(), 1);
        assert_eq!(criteria.names(), vec!["cost", "perf"]);
    }

    #[test]
    fn criteria_rejects_empty_list() {
        assert_eq!(Criteria::new(vec![]), Err(AnalysisError::NoCriteria));
    }

    #[test]
    fn criteria_rejects_duplicate_names() {
        let result = Criteria::new(vec![
            CriterionSpec::maximize("perf"),
            CriterionSpec::minimize("perf"),
        ]);
        assert_eq!(result, Err(AnalysisError::DuplicateCriterion("perf".to_string())));
    }

    #[test]
    fn criteria_rejects_non_positive_weight() {
        let result = Criteria::new(vec![CriterionSpec::maximize("perf").with_weight(0.0)]);
        assert!(matches!(result, Err(AnalysisError::InvalidWeight { .. })));

        let result = Criteria::new(vec![CriterionSpec::maximize("perf").with_weight(f64::NAN)]);
        assert!(matches!(result, Err(AnalysisError::InvalidWeight { .. })));
    }

    #[test]
    fn auto_detect_picks_single_minimizing_criterion() {
        let criteria = cost_perf();
        assert_eq!(criteria.auto_detect_axis().map(|c| c.name.as_str()), Some("cost"));
    }

    #[test]
    fn auto_detect_yields_none_without_minimizing_criterion() {
        let criteria = Criteria::new(vec![
            CriterionSpec::maximize("perf"),
            CriterionSpec::maximize("ram"),
        ])
        .unwrap();
        assert!(criteria.auto_detect_axis().is_none());
    }

    #[test]
    fn auto_detect_yields_none_with_two_minimizing_criteria() {
        let criteria = Criteria::new(vec![
            CriterionSpec::minimize("cost"),
            CriterionSpec::minimize("power"),
            CriterionSpec::maximize("perf"),
        ])
        .unwrap();
        assert!(criteria.auto_detect_axis().is_none());
    }

    #[test]
    fn without_slot_keeps_remaining_slots() {
        let criteria = cost_perf();
        let rest = criteria.without_slot(0);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].name, "perf");
        assert_eq!(rest[0].slot(), 1);
    }

    #[test]
    fn axis_forward_depends_on_direction() {
        let asc = OrderingAxis::new("cost", 0, AxisDirection::Asc);
        assert!(asc.is_forward(10.0, 20.0));
        assert!(!asc.is_forward(20.0, 20.0));

        let desc = OrderingAxis::new("cost", 0, AxisDirection::Desc);
        assert!(desc.is_forward(20.0, 10.0));
        assert!(!desc.is_forward(10.0, 20.0));
    }

    #[test]
    fn criterion_spec_deserializes_with_defaults() {
        let spec: CriterionSpec = serde_json::from_str(r#"{"name":"ram"}"#).unwrap();
        assert_eq!(spec.direction, Direction::Maximize);
        assert!((spec.weight - 1.0).abs() < f64::EPSILON);

        let spec: CriterionSpec =
            serde_json::from_str(r#"{"name":"price","direction":"min","weight":2}"#).unwrap();
        assert_eq!(spec.direction, Direction::Minimize);
        assert!((spec.weight - 2.0).abs() < f64::EPSILON);
    }
}
