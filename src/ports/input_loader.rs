//! Input Loader Port - Reading candidate records from structured text.
//!
//! This port defines the contract for turning a file or stdin payload into
//! raw records (numeric fields resolved) plus any structured metadata. The
//! analysis core never sees text; adapters (like SerdeInputLoader) do the
//! parsing and type coercion.

use std::path::Path;

use thiserror::Error;

use crate::domain::analysis::{RawRecord, StructuredMeta};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for loading candidate records.
///
/// # Contract
///
/// Implementations must:
/// - Return zero records (not an error) for blank input
/// - Resolve numeric fields, coercing numeric strings
/// - Keep non-numeric text fields as labels (names)
/// - Reject payloads that are neither a record list nor an object with
///   a `configs` list
///
/// # Usage
///
/// ```rust,ignore
/// let loader: &dyn InputLoader = get_loader();
///
/// let input = loader.load_path(Path::new("gpus.json"))?;
/// let cost_hint = input.meta.as_ref().and_then(|m| m.cost_field.clone());
/// ```
pub trait InputLoader: Send + Sync {
    /// Parse `text` in the given format.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the text cannot be parsed or has the wrong shape.
    fn load_str(&self, text: &str, format: InputFormat) -> Result<LoadedInput, LoadError>;

    /// Read and parse a file; the format follows the extension.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Io` if the file cannot be read, otherwise as
    /// [`InputLoader::load_str`].
    fn load_path(&self, path: &Path) -> Result<LoadedInput, LoadError>;
}

/// Supported input syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// JSON; text that does not parse as JSON is retried as CSV.
    #[default]
    Json,
    Yaml,
    /// Comma-separated rows under a header line.
    Csv,
}

impl InputFormat {
    /// Picks the format from a file extension; anything but `.yaml`/`.yml`
    /// or `.csv` is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => InputFormat::Yaml,
            Some("csv") => InputFormat::Csv,
            _ => InputFormat::Json,
        }
    }

    /// Parses `json`, `yaml`/`yml` or `csv` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Some(InputFormat::Json),
            "yaml" | "yml" => Some(InputFormat::Yaml),
            "csv" => Some(InputFormat::Csv),
            _ => None,
        }
    }
}

/// Records plus optional structured metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedInput {
    pub records: Vec<RawRecord>,
    /// Present only for the `{configs, criteria, cost_field}` shape.
    pub meta: Option<StructuredMeta>,
}

impl LoadedInput {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Axis suggested by structured input.
    pub fn cost_field(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.cost_field.as_deref())
    }
}

/// Errors from input loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input could not be read.
    #[error("Failed to read input {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON syntax error.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML syntax error.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// CSV syntax error.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Parsed, but not a shape we understand.
    #[error("Malformed input: {0}")]
    Malformed(String),

    /// Nothing to analyze.
    #[error("No items in input")]
    Empty,
}

impl LoadError {
    /// Creates an I/O error for a named source.
    pub fn io(source_name: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            source_name: source_name.into(),
            source,
        }
    }

    /// Creates a malformed-input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LoadError::Io { .. } => ErrorCode::InputUnreadable,
            LoadError::Json(_)
            | LoadError::Yaml(_)
            | LoadError::Csv(_)
            | LoadError::Malformed(_) => ErrorCode::InputMalformed,
            LoadError::Empty => ErrorCode::EmptyInput,
        }
    }
}

impl From<LoadError> for DomainError {
    fn from(err: LoadError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
