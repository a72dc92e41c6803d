//! Startup artifacts - model, encoder table, training columns
//!
//! All three are produced by the training side and shipped as files. They
//! load exactly once, before the router is built, and are shared read-only
//! across handler invocations. No reload, no teardown.

use std::fs;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::Config;
use crate::pipeline::{EncoderTable, EngineStats, OnnxRegressor, Regressor, TrainingColumns};

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to load model: {0}")]
    Model(#[from] crate::pipeline::InferenceError),
}

/// Immutable bundle passed into the handlers at construction time.
pub struct Artifacts {
    pub model: Box<dyn Regressor>,
    pub encoders: EncoderTable,
    pub columns: TrainingColumns,
    pub stats: EngineStats,
    pub loaded_at: DateTime<Utc>,
}

impl Artifacts {
    pub fn new(
        model: Box<dyn Regressor>,
        encoders: EncoderTable,
        columns: TrainingColumns,
    ) -> Self {
        Self {
            model,
            encoders,
            columns,
            stats: EngineStats::new(),
            loaded_at: Utc::now(),
        }
    }

    /// Load all three artifacts from the configured paths.
    pub fn load(config: &Config) -> Result<Self, ArtifactError> {
        let encoders: EncoderTable = read_json(&config.encoders_path)?;
        tracing::info!(
            "Loaded {} label encoders from {}",
            encoders.len(),
            config.encoders_path
        );
        tracing::debug!(
            "Encoder columns: {:?}",
            encoders.columns().collect::<Vec<_>>()
        );

        let columns: TrainingColumns = read_json(&config.training_columns_path)?;
        tracing::info!(
            "Loaded {} training columns from {}",
            columns.len(),
            config.training_columns_path
        );

        let model = OnnxRegressor::load(&config.model_path)?;

        Ok(Self::new(Box::new(model), encoders, columns))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_string(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_string(),
        source,
    })
}
