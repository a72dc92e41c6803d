//! Inference Pipeline
//!
//! Per-request transformation from a raw JSON record to a price:
//! feature derivation -> categorical encoding -> column alignment ->
//! model inference -> inverse target transform. Stateless apart from the
//! read-only artifacts shared across requests.

pub mod row;
pub mod derive;
pub mod encoder;
pub mod schema;
pub mod inference;


// Re-export common types
pub use row::{Cell, FeatureRow};
pub use encoder::{EncodeOutcome, EncoderTable, LabelEncoder, UNKNOWN_CATEGORY_CODE};
pub use schema::TrainingColumns;
pub use inference::{EngineStats, InferenceError, OnnxRegressor, Regressor};

use std::time::Instant;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::artifacts::Artifacts;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("field is not numeric: {0}")]
    NonNumericField(String),

    #[error("column is not numeric after encoding: {0}")]
    NonNumericColumn(String),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Run the full pipeline for one record.
///
/// The model output is a log-transformed price; `expm1` recovers the
/// original units before the value is returned.
pub fn predict_price(
    artifacts: &Artifacts,
    record: &Map<String, Value>,
) -> Result<f32, PipelineError> {
    let start = Instant::now();

    let mut row = FeatureRow::from_record(record);
    derive::derive_features(&mut row)?;
    artifacts.encoders.encode_row(&mut row);

    let aligned = artifacts.columns.align(&row)?;
    let log_price = artifacts.model.predict(&aligned)?;
    let price = log_price.exp_m1();

    artifacts.stats.record(start.elapsed().as_micros() as u64);

    Ok(price)
}
