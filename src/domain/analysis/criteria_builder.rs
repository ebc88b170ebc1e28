//! Criteria Builder - Unified criterion list from flags and structured input.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::domain::foundation::ValidationError;

use super::{AnalysisError, Criteria, CriterionSpec, Direction};

/// Metadata carried by structured input alongside its records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredMeta {
    /// Declared criteria; these take precedence over flag-style criteria.
    #[serde(default)]
    pub criteria: Option<Vec<CriterionSpec>>,
    /// Suggested ordering axis.
    #[serde(default)]
    pub cost_field: Option<String>,
}

/// Parses `"field:max,field:min"`.
///
/// Entries without a `:` are skipped. The direction follows the last `:`,
/// so field names may contain colons. Unknown directions are logged and
/// treated as maximize.
pub fn parse_criteria_arg(arg: &str) -> Vec<CriterionSpec> {
    arg.split(',')
        .map(str::trim)
        .filter_map(|part| part.rsplit_once(':'))
        .map(|(name, direction)| {
            let name = name.trim();
            let direction = Direction::parse(direction).unwrap_or_else(|| {
                warn!(
                    criterion = name,
                    direction = direction.trim(),
                    "Unknown direction, treating as maximize"
                );
                Direction::Maximize
            });
            CriterionSpec::new(name, direction)
        })
        .collect()
}

/// Parses `"field:weight,field:weight"`.
///
/// # Errors
///
/// Returns `InvalidFormat` if a weight is not a number.
pub fn parse_weights_arg(arg: &str) -> Result<HashMap<String, f64>, ValidationError> {
    let mut weights = HashMap::new();

    for (name, value) in arg.split(',').map(str::trim).filter_map(|p| p.rsplit_once(':')) {
        let weight: f64 = value.trim().parse().map_err(|_| {
            ValidationError::invalid_format(
                "weights",
                format!("'{}' is not a number for {}", value.trim(), name.trim()),
            )
        })?;
        weights.insert(name.trim().to_string(), weight);
    }

    Ok(weights)
}

/// Splits a comma-separated field list, dropping blanks.
pub fn parse_field_list(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(String::from)
        .collect()
}

/// Builder for the criterion list of one run.
///
/// # Example
///
/// ```
/// use pareto_decide::domain::analysis::CriteriaBuilder;
///
/// let criteria = CriteriaBuilder::new()
///     .maximize(["perf"])
///     .minimize(["cost"])
///     .build()
///     .unwrap();
/// assert_eq!(criteria.names(), vec!["perf", "cost"]);
/// ```
#[derive(Debug, Default)]
pub struct CriteriaBuilder {
    structured: Option<Vec<CriterionSpec>>,
    flagged: Vec<CriterionSpec>,
    maximize: Vec<String>,
    minimize: Vec<String>,
    weights: HashMap<String, f64>,
}

impl CriteriaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the criteria declared by structured input, if any.
    pub fn structured(mut self, meta: Option<&StructuredMeta>) -> Self {
        self.structured = meta.and_then(|m| m.criteria.clone());
        self
    }

    /// Adds `"field:max,field:min"` entries.
    pub fn criteria_arg(mut self, arg: &str) -> Self {
        self.flagged.extend(parse_criteria_arg(arg));
        self
    }

    pub fn maximize<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.maximize.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn minimize<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.minimize.extend(names.into_iter().map(Into::into));
        self
    }

    /// Weight overrides by criterion name.
    pub fn weights(mut self, weights: HashMap<String, f64>) -> Self {
        self.weights.extend(weights);
        self
    }

    /// Produces the validated criteria.
    ///
    /// Structured criteria win outright. Otherwise flag-style entries come
    /// first, then maximize names, then minimize names; repeated names keep
    /// their first occurrence.
    ///
    /// # Errors
    ///
    /// - `NoCriteria` if nothing was supplied
    /// - `InvalidWeight` / `DuplicateCriterion` from validation
    pub fn build(self) -> Result<Criteria, AnalysisError> {
        let specs: Vec<CriterionSpec> = match self.structured {
            Some(declared) => declared
                .into_iter()
                .map(|spec| match self.weights.get(&spec.name) {
                    Some(&w) => spec.with_weight(w),
                    None => spec,
                })
                .collect(),
            None => {
                let mut seen = HashSet::new();
                self.flagged
                    .into_iter()
                    .chain(self.maximize.into_iter().map(CriterionSpec::maximize))
                    .chain(self.minimize.into_iter().map(CriterionSpec::minimize))
                    .filter(|spec| seen.insert(spec.name.clone()))
                    .map(|spec| {
                        let weight = self.weights.get(&spec.name).copied().unwrap_or(1.0);
                        spec.with_weight(weight)
                    })
                    .collect()
            }
        };

        Criteria::new(specs)
    }
}
