//! Serde-based input loader for JSON, YAML and CSV payloads.
//!
//! JSON and YAML are parsed into a `serde_json::Value` tree first, so the
//! shape handling below is shared. CSV rows become flat records directly.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::domain::analysis::{CriterionSpec, RawRecord, StructuredMeta};
use crate::ports::{InputFormat, InputLoader, LoadError, LoadedInput};

/// Loader accepting either a list of records or
/// `{configs, criteria?, cost_field?}`.
#[derive(Debug, Clone, Default)]
pub struct SerdeInputLoader;

impl SerdeInputLoader {
    pub fn new() -> Self {
        Self
    }

    fn from_csv(text: &str) -> Result<LoadedInput, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());
        let headers = reader.headers()?.clone();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let mut record = RawRecord::new();
            // Cells past the header width are dropped; blank cells stay unset
            for (key, cell) in headers.iter().zip(row.iter()) {
                if !cell.is_empty() {
                    Self::insert_text(&mut record, key.to_string(), cell.to_string());
                }
            }
            records.push(record);
        }

        Ok(LoadedInput {
            records,
            meta: None,
        })
    }

    fn from_value(value: Value) -> Result<LoadedInput, LoadError> {
        match value {
            Value::Array(items) => Ok(LoadedInput {
                records: Self::records(items)?,
                meta: None,
            }),
            Value::Object(mut map) => {
                let configs = match map.remove("configs") {
                    Some(Value::Array(items)) => items,
                    Some(_) => {
                        return Err(LoadError::malformed("'configs' must be a list of records"))
                    }
                    None => {
                        return Err(LoadError::malformed(
                            "expected a list of records or an object with a 'configs' key",
                        ))
                    }
                };
                let meta = Self::meta(map)?;
                Ok(LoadedInput {
                    records: Self::records(configs)?,
                    meta: Some(meta),
                })
            }
            _ => Err(LoadError::malformed(
                "expected a list of records or an object with a 'configs' key",
            )),
        }
    }

    fn meta(mut map: Map<String, Value>) -> Result<StructuredMeta, LoadError> {
        let criteria = match map.remove("criteria") {
            Some(Value::Null) | None => None,
            Some(value) => Some(serde_json::from_value::<Vec<CriterionSpec>>(value)?),
        };
        let cost_field = match map.remove("cost_field") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
            Some(Value::Null) | None => None,
            Some(other) => {
                warn!(value = %other, "Ignoring non-text cost_field");
                None
            }
        };

        Ok(StructuredMeta { criteria, cost_field })
    }

    fn records(items: Vec<Value>) -> Result<Vec<RawRecord>, LoadError> {
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok(Self::record(index, map)),
                other => Err(LoadError::malformed(format!(
                    "record {} is not an object: {}",
                    index, other
                ))),
            })
            .collect()
    }

    fn record(index: usize, map: Map<String, Value>) -> RawRecord {
        let mut record = RawRecord::new();

        for (key, value) in map {
            match value {
                Value::Number(n) => {
                    if let Some(v) = n.as_f64() {
                        record.fields.insert(key, v);
                    }
                }
                Value::String(s) => Self::insert_text(&mut record, key, s),
                Value::Null => {}
                other => {
                    warn!(
                        record = index,
                        field = %key,
                        value = %other,
                        "Ignoring non-numeric field"
                    );
                }
            }
        }

        record
    }

    /// Numeric text becomes a field; anything else is kept as a label.
    fn insert_text(record: &mut RawRecord, key: String, text: String) {
        match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => {
                record.fields.insert(key, v);
            }
            _ => {
                record.labels.insert(key, text);
            }
        }
    }
}

impl InputLoader for SerdeInputLoader {
    fn load_str(&self, text: &str, format: InputFormat) -> Result<LoadedInput, LoadError> {
        if text.trim().is_empty() {
            return Ok(LoadedInput::default());
        }

        match format {
            InputFormat::Json => match serde_json::from_str::<Value>(text) {
                Ok(value) => Self::from_value(value),
                Err(err) => {
                    debug!(error = %err, "Input is not JSON, reading it as CSV");
                    Self::from_csv(text)
                }
            },
            InputFormat::Yaml => Self::from_value(serde_yaml::from_str::<Value>(text)?),
            InputFormat::Csv => Self::from_csv(text),
        }
    }

    fn load_path(&self, path: &Path) -> Result<LoadedInput, LoadError> {
        let text = fs::read_to_string(path)
            .map_err(|e| LoadError::io(path.display().to_string(), e))?;
        self.load_str(&text, InputFormat::from_path(path))
    }
}
