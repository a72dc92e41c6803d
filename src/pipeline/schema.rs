//! Training schema - the authoritative feature layout
//!
//! The column list the model was trained on is the single source of truth
//! for the inference input. Every request row is reindexed against it:
//! columns the row lacks are zero-filled, columns the schema lacks are
//! dropped, and the result is a fixed-width vector in schema order.

use serde::{Deserialize, Serialize};

use super::row::{Cell, FeatureRow};
use super::PipelineError;

/// Ordered feature schema, loaded once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingColumns {
    columns: Vec<String>,
}

impl TrainingColumns {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn names(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Reindex a row into a model-ready vector in schema order.
    ///
    /// A text cell surviving into an aligned column means the value never
    /// went through an encoder the model knows about; that is a type error
    /// on the caller's side, not an unknown category.
    pub fn align(&self, row: &FeatureRow) -> Result<Vec<f32>, PipelineError> {
        let mut aligned = Vec::with_capacity(self.columns.len());

        for column in &self.columns {
            let value = match row.get(column) {
                Some(Cell::Number(v)) => *v,
                Some(Cell::Text(_)) => {
                    return Err(PipelineError::NonNumericColumn(column.clone()));
                }
                None => 0.0,
            };
            aligned.push(value);
        }

        Ok(aligned)
    }
}
