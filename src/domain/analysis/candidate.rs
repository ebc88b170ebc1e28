//! Candidate Set - Fixed-schema arena of candidate records.
//!
//! Every candidate carries one value per schema field. The schema starts
//! with the criterion names in declaration order, so a criterion's slot
//! indexes directly into each record. Extra fields (an ordering axis that
//! is not itself a criterion) follow the criteria.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Criteria, Criterion, OrderingAxis};

/// A record as produced by an input loader, before schema binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Numeric fields.
    pub fields: BTreeMap<String, f64>,
    /// Textual fields (names, labels).
    pub labels: BTreeMap<String, String>,
}

impl RawRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a numeric field.
    pub fn with_field(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Adds a textual field.
    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(name.into(), value.into());
        self
    }

    /// Display name from `name_field`, if the record carries one.
    ///
    /// A numeric name field is rendered the way the number prints.
    pub fn name(&self, name_field: &str) -> Option<String> {
        self.labels
            .get(name_field)
            .cloned()
            .or_else(|| self.fields.get(name_field).map(|v| v.to_string()))
    }
}

/// One candidate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Original input position; the identity used in every result.
    pub index: usize,
    pub name: String,
    values: Vec<f64>,
}

impl Candidate {
    /// Value at a schema slot; missing slots read as 0.
    pub fn value(&self, slot: usize) -> f64 {
        self.values.get(slot).copied().unwrap_or(0.0)
    }

    /// Value of a criterion.
    pub fn get(&self, criterion: &Criterion) -> f64 {
        self.value(criterion.slot())
    }

    /// Value along the ordering axis.
    pub fn axis_value(&self, axis: &OrderingAxis) -> f64 {
        self.value(axis.slot())
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Ordered, immutable sequence of candidates sharing one schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateSet {
    fields: Vec<String>,
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    /// Binds loader records to the criteria schema.
    ///
    /// Missing numeric fields default to 0. Names come from `name_field`
    /// or are synthesized as `#<index>`.
    pub fn from_records(
        records: &[RawRecord],
        criteria: &Criteria,
        name_field: &str,
        extra_fields: &[String],
    ) -> Self {
        let mut fields: Vec<String> = criteria.iter().map(|c| c.name.clone()).collect();
        for extra in extra_fields {
            if !fields.contains(extra) {
                fields.push(extra.clone());
            }
        }

        let candidates = records
            .iter()
            .enumerate()
            .map(|(index, record)| Candidate {
                index,
                name: record.name(name_field).unwrap_or_else(|| default_name(index)),
                values: fields
                    .iter()
                    .map(|f| record.fields.get(f).copied().unwrap_or(0.0))
                    .collect(),
            })
            .collect();

        Self { fields, candidates }
    }

    /// Creates a builder with an explicit field list.
    pub fn builder(criteria: &Criteria) -> CandidateSetBuilder {
        CandidateSetBuilder::new(criteria)
    }

    /// Schema field names; criteria first.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Slot of a schema field.
    pub fn slot_of(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    /// Display name for an index, `#<index>` when out of range.
    pub fn name_of(&self, index: usize) -> String {
        self.candidates
            .get(index)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| default_name(index))
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

fn default_name(index: usize) -> String {
    format!("#{}", index)
}

/// Builder for constructing CandidateSet instances directly.
#[derive(Debug)]
pub struct CandidateSetBuilder {
    fields: Vec<String>,
    candidates: Vec<Candidate>,
}

impl CandidateSetBuilder {
    /// Creates a builder whose schema is the criteria names.
    pub fn new(criteria: &Criteria) -> Self {
        Self {
            fields: criteria.iter().map(|c| c.name.clone()).collect(),
            candidates: Vec::new(),
        }
    }

    /// Appends an extra schema field after the criteria.
    pub fn extra_field(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.fields.contains(&name) {
            self.fields.push(name);
        }
        self
    }

    /// Adds a named candidate with values in schema order.
    ///
    /// Short rows are padded with 0; surplus values are dropped.
    pub fn row(mut self, name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        let index = self.candidates.len();
        let mut values: Vec<f64> = values.into_iter().take(self.fields.len()).collect();
        values.resize(self.fields.len(), 0.0);
        self.candidates.push(Candidate {
            index,
            name: name.into(),
            values,
        });
        self
    }

    /// Adds an unnamed candidate; its name becomes `#<index>`.
    pub fn unnamed_row(self, values: impl IntoIterator<Item = f64>) -> Self {
        let name = default_name(self.candidates.len());
        self.row(name, values)
    }

    pub fn build(self) -> CandidateSet {
        CandidateSet {
            fields: self.fields,
            candidates: self.candidates,
        }
    }
}
