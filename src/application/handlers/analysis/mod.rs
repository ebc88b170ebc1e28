//! Analysis command handlers.

mod run_analysis;

pub use run_analysis::{InputSource, RunAnalysisCommand, RunAnalysisHandler, RunAnalysisResult};
