//! Label encoding - categorical column -> trained integer code
//!
//! Encoders are fit at training time and shipped as a JSON artifact; at
//! serving time they are pure lookups. A value outside an encoder's
//! vocabulary (or a column missing from the record entirely) has no
//! trained code, so it maps to the `-1` sentinel and the request keeps
//! going. Only the unknown-category cases degrade; type errors surface
//! later at alignment instead of being folded in here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::row::{Cell, FeatureRow};

/// Integer code substituted for categories the encoder has never seen.
pub const UNKNOWN_CATEGORY_CODE: i64 = -1;

/// Outcome of encoding one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeOutcome {
    /// Category was in the trained vocabulary.
    Encoded(i64),
    /// No trained code exists: unseen category or missing column.
    Unknown,
}

impl EncodeOutcome {
    /// The numeric value written into the row.
    pub fn code(self) -> i64 {
        match self {
            EncodeOutcome::Encoded(code) => code,
            EncodeOutcome::Unknown => UNKNOWN_CATEGORY_CODE,
        }
    }
}

/// A fitted label encoder: bijection category string -> integer code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelEncoder {
    classes: HashMap<String, i64>,
}

impl LabelEncoder {
    pub fn new(classes: HashMap<String, i64>) -> Self {
        Self { classes }
    }

    /// Look up the trained code for a category.
    pub fn encode(&self, category: &str) -> EncodeOutcome {
        match self.classes.get(category) {
            Some(&code) => EncodeOutcome::Encoded(code),
            None => EncodeOutcome::Unknown,
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.classes.len()
    }
}

/// Column name -> fitted encoder. Loaded once at startup, immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncoderTable {
    encoders: HashMap<String, LabelEncoder>,
}

impl EncoderTable {
    pub fn new(encoders: HashMap<String, LabelEncoder>) -> Self {
        Self { encoders }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.encoders.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }

    /// Encode every encoder-owned column of the row in place.
    ///
    /// Columns without an encoder are left untouched. A cell outside the
    /// vocabulary, or a column absent from the record, is written as the
    /// `-1` sentinel; the record-level outcome is never an error.
    pub fn encode_row(&self, row: &mut FeatureRow) {
        for (column, encoder) in &self.encoders {
            let outcome = match row.get(column) {
                Some(cell) => encoder.encode(&cell.as_category_key()),
                None => EncodeOutcome::Unknown,
            };

            if outcome == EncodeOutcome::Unknown {
                tracing::debug!("Unknown category for column {}", column);
            }

            row.set(column, Cell::Number(outcome.code() as f32));
        }
    }
}
