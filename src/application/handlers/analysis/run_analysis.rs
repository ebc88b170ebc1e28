//! RunAnalysisHandler - Command handler for one analysis run.
//!
//! Loads candidate records through the `InputLoader` port, builds the
//! criteria, binds the records to a fixed schema and runs the analysis
//! pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::domain::analysis::{
    analyze, parse_weights_arg, AnalysisOptions, AnalysisResult, AxisDirection, CandidateSet,
    CriteriaBuilder, DEFAULT_SWEET_SPOT_THRESHOLD, DEFAULT_TRAP_TOLERANCE,
};
use crate::domain::foundation::DomainError;
use crate::ports::{InputFormat, InputLoader, LoadError, LoadedInput};

/// Where the records come from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// A file; the format follows the extension.
    Path(PathBuf),
    /// Already-read text, e.g. stdin.
    Text { text: String, format: InputFormat },
}

/// Command to run one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct RunAnalysisCommand {
    pub source: InputSource,
    /// Fields to maximize.
    pub maximize: Vec<String>,
    /// Fields to minimize.
    pub minimize: Vec<String>,
    /// `"field:max,field:min"` criteria.
    pub criteria: Option<String>,
    /// `"field:weight,..."` overrides.
    pub weights: Option<String>,
    /// Explicit ordering axis.
    pub sort_by: Option<String>,
    pub sort_direction: AxisDirection,
    pub threshold: f64,
    pub tolerance: f64,
    pub name_field: String,
    pub num_segments: Option<usize>,
}

impl RunAnalysisCommand {
    /// Creates a command with default analysis settings and no criteria.
    pub fn new(source: InputSource) -> Self {
        Self {
            source,
            maximize: Vec::new(),
            minimize: Vec::new(),
            criteria: None,
            weights: None,
            sort_by: None,
            sort_direction: AxisDirection::Asc,
            threshold: DEFAULT_SWEET_SPOT_THRESHOLD,
            tolerance: DEFAULT_TRAP_TOLERANCE,
            name_field: "name".to_string(),
            num_segments: None,
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RunAnalysisResult {
    pub result: AnalysisResult,
    /// The schema-bound candidates the result indexes into.
    pub candidates: CandidateSet,
}

/// Handler for analysis runs.
pub struct RunAnalysisHandler {
    loader: Arc<dyn InputLoader>,
}

impl RunAnalysisHandler {
    pub fn new(loader: Arc<dyn InputLoader>) -> Self {
        Self { loader }
    }

    pub fn handle(&self, cmd: RunAnalysisCommand) -> Result<RunAnalysisResult, DomainError> {
        // 1. Load records
        let input = self.load(&cmd.source)?;
        if input.is_empty() {
            return Err(LoadError::Empty.into());
        }

        // 2. Build criteria
        let weights = match cmd.weights.as_deref() {
            Some(arg) => parse_weights_arg(arg)?,
            None => Default::default(),
        };
        let criteria = CriteriaBuilder::new()
            .structured(input.meta.as_ref())
            .criteria_arg(cmd.criteria.as_deref().unwrap_or(""))
            .maximize(cmd.maximize)
            .minimize(cmd.minimize)
            .weights(weights)
            .build()?;

        // 3. Bind records; an axis outside the criteria joins the schema and
        //    records without it read as 0
        let axis_hint = input.cost_field().map(String::from);
        let axis_name = cmd.sort_by.clone().or_else(|| axis_hint.clone());
        let extra_fields: Vec<String> = axis_name
            .filter(|name| criteria.get(name).is_none())
            .into_iter()
            .collect();
        let candidates =
            CandidateSet::from_records(&input.records, &criteria, &cmd.name_field, &extra_fields);

        // 4. Analyze
        let options = AnalysisOptions {
            axis: cmd.sort_by,
            axis_hint,
            axis_direction: cmd.sort_direction,
            threshold: cmd.threshold,
            tolerance: cmd.tolerance,
            num_segments: cmd.num_segments,
        };
        let result = analyze(&candidates, &criteria, &options)?;

        info!(
            total = result.summary.total,
            pareto = result.summary.pareto_count,
            axis = result.sort_field.as_deref().unwrap_or("-"),
            "Analysis complete"
        );

        Ok(RunAnalysisResult { result, candidates })
    }

    fn load(&self, source: &InputSource) -> Result<LoadedInput, LoadError> {
        match source {
            InputSource::Path(path) => self.loader.load_path(path),
            InputSource::Text { text, format } => self.loader.load_str(text, *format),
        }
    }
}
