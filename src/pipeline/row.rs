//! Feature Row - per-request working record
//!
//! A row is built fresh from the incoming JSON record, mutated in place by
//! the derivation and encoding stages, then flattened into a fixed-width
//! vector by column alignment. Discarded after the response.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::PipelineError;

/// A single cell in a feature row.
///
/// Numeric cells are model-ready; text cells are raw categorical values
/// that must pass through a label encoder before alignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f32),
    Text(String),
}

impl Cell {
    /// String form used as the lookup key for label encoding.
    ///
    /// Numbers stringify the way they were stringified at training time
    /// (200 -> "200", 1.5 -> "1.5").
    pub fn as_category_key(&self) -> String {
        match self {
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

/// Ephemeral per-request record, field name -> cell.
#[derive(Debug, Clone, Default)]
pub struct FeatureRow {
    cells: HashMap<String, Cell>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self { cells: HashMap::new() }
    }

    /// Build a row from a flat JSON object.
    ///
    /// Scalars map directly; booleans become text (categorical); null and
    /// nested values carry no trained meaning and are treated as absent.
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let mut row = Self::new();

        for (field, value) in record {
            match value {
                Value::Number(n) => {
                    if let Some(v) = n.as_f64() {
                        row.set(field, Cell::Number(v as f32));
                    }
                }
                Value::String(s) => row.set(field, Cell::Text(s.clone())),
                Value::Bool(b) => row.set(field, Cell::Text(b.to_string())),
                other => {
                    tracing::debug!("Skipping non-scalar field {}: {}", field, other);
                }
            }
        }

        row
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.cells.get(name)
    }

    pub fn set(&mut self, name: &str, cell: Cell) {
        self.cells.insert(name.to_string(), cell);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read a required numeric field.
    ///
    /// Missing or non-numeric fields are hard errors; derived features
    /// cannot be computed without them.
    pub fn numeric(&self, name: &str) -> Result<f32, PipelineError> {
        match self.cells.get(name) {
            Some(Cell::Number(v)) => Ok(*v),
            Some(Cell::Text(_)) => Err(PipelineError::NonNumericField(name.to_string())),
            None => Err(PipelineError::MissingField(name.to_string())),
        }
    }
}
