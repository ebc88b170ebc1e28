//! pareto-decide - Multi-criteria Pareto analysis from the command line.

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use pareto_decide::adapters::SerdeInputLoader;
use pareto_decide::application::{InputSource, RunAnalysisCommand, RunAnalysisHandler};
use pareto_decide::config::{AnalysisOverrides, AppConfig};
use pareto_decide::domain::analysis::{parse_field_list, AnalysisResult, AxisDirection};
use pareto_decide::ports::{InputFormat, LoadError};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortDir {
    /// Higher axis values cost more
    Asc,
    /// Lower axis values cost more
    Desc,
}

impl From<SortDir> for AxisDirection {
    fn from(dir: SortDir) -> Self {
        match dir {
            SortDir::Asc => AxisDirection::Asc,
            SortDir::Desc => AxisDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum InputSyntax {
    /// JSON, falling back to CSV when the text is not JSON
    #[default]
    Json,
    Yaml,
    Csv,
}

impl From<InputSyntax> for InputFormat {
    fn from(syntax: InputSyntax) -> Self {
        match syntax {
            InputSyntax::Json => InputFormat::Json,
            InputSyntax::Yaml => InputFormat::Yaml,
            InputSyntax::Csv => InputFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "pareto-decide")]
#[command(
    about = "Multi-criteria Pareto analysis with marginal gain sweet spot detection",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Input file (JSON, YAML or CSV). Omit or - for stdin
    input: Option<PathBuf>,

    /// Fields to maximize (comma-separated)
    #[arg(short = 'M', long, default_value = "")]
    maximize: String,

    /// Fields to minimize (comma-separated)
    #[arg(short = 'm', long, default_value = "")]
    minimize: String,

    /// Criteria as "field:max,field:min,..."
    #[arg(short = 'c', long)]
    criteria: Option<String>,

    /// Ordering axis for marginal gain analysis
    #[arg(long)]
    sort_by: Option<String>,

    /// Axis direction (asc: higher costs more, desc: lower costs more)
    #[arg(long, value_enum)]
    sort_dir: Option<SortDir>,

    /// Weights as "field:weight,..."
    #[arg(long)]
    weights: Option<String>,

    /// Sweet spot gain score threshold
    #[arg(long)]
    threshold: Option<f64>,

    /// Trap proximity ratio
    #[arg(long)]
    tolerance: Option<f64>,

    /// Number of axis segments for segment bests
    #[arg(long)]
    segments: Option<usize>,

    /// Field holding the display name
    #[arg(long)]
    name_field: Option<String>,

    /// Syntax of stdin input
    #[arg(long, value_enum, default_value = "json")]
    input_format: InputSyntax,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "json")]
    format: OutputFormat,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = AppConfig::load()?;
    config.analysis = config.analysis.with_overrides(AnalysisOverrides {
        threshold: cli.threshold,
        tolerance: cli.tolerance,
        name_field: cli.name_field,
        sort_direction: cli.sort_dir.map(Into::into),
        num_segments: cli.segments,
    });
    config.validate()?;
    config.logging.init();

    let source = match cli.input {
        Some(path) if path.as_os_str() != "-" => InputSource::Path(path),
        _ => InputSource::Text {
            text: io::read_to_string(io::stdin()).map_err(|e| LoadError::io("stdin", e))?,
            format: cli.input_format.into(),
        },
    };

    let settings = config.analysis;
    let cmd = RunAnalysisCommand {
        source,
        maximize: parse_field_list(&cli.maximize),
        minimize: parse_field_list(&cli.minimize),
        criteria: cli.criteria,
        weights: cli.weights,
        sort_by: cli.sort_by,
        sort_direction: settings.sort_direction,
        threshold: settings.threshold,
        tolerance: settings.tolerance,
        name_field: settings.name_field,
        num_segments: settings.num_segments,
    };

    let handler = RunAnalysisHandler::new(Arc::new(SerdeInputLoader::new()));
    let run = handler.handle(cmd)?;

    let rendered = match cli.format {
        OutputFormat::Json => serde_json::to_string_pretty(&run.result)?,
        OutputFormat::Yaml => serde_yaml::to_string(&run.result)?,
    };
    println!("{}", rendered);

    print_summary(&run.result);
    Ok(())
}

/// Short run summary on stderr, leaving stdout to the structured result.
fn print_summary(result: &AnalysisResult) {
    let summary = &result.summary;

    if result.sort_field_auto_detected {
        if let Some(field) = &result.sort_field {
            eprintln!("Auto-detected sort-by: {}", field);
        }
    }
    eprintln!(
        "Pareto: {}/{} ({:.0}%)",
        summary.pareto_count,
        summary.total,
        summary.pareto_ratio * 100.0
    );
    if let Some(sweet_spots) = summary.sweet_spots_count {
        let mut parts = vec![
            format!("Sweet spots: {}", sweet_spots),
            format!("Traps: {}", summary.traps_count.unwrap_or(0)),
        ];
        if let Some(segments) = summary.segment_count {
            parts.push(format!("Segments: {}", segments));
        }
        eprintln!("{}", parts.join(", "));
    }
}
