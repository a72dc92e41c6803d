//! Inference Engine - ONNX Runtime Integration
//!
//! Loads the exported regression model and runs it on aligned feature
//! vectors. The session is the only piece of shared state that needs a
//! lock; session runs require exclusive access, so it sits behind a mutex
//! while everything around it stays immutable.

use std::sync::atomic::{AtomicU64, Ordering};

use ndarray::Array2;
use parking_lot::Mutex;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub struct InferenceError(pub String);

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InferenceError: {}", self.0)
    }
}

impl std::error::Error for InferenceError {}

// ============================================================================
// REGRESSOR TRAIT
// ============================================================================

/// A regressor mapping a fixed-width feature vector to one scalar.
///
/// The scalar is in log space; the inverse transform happens in the
/// pipeline, not here.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &[f32]) -> Result<f32, InferenceError>;
    fn model_name(&self) -> &str;
}

// ============================================================================
// ENGINE STATISTICS
// ============================================================================

/// Latency stats, updated per prediction
#[derive(Debug, Default)]
pub struct EngineStats {
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl EngineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, elapsed_us: u64) {
        self.latency_sum_us.fetch_add(elapsed_us, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inference_count(&self) -> u64 {
        self.inference_count.load(Ordering::Relaxed)
    }

    pub fn avg_latency_ms(&self) -> f32 {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        if count > 0 {
            (sum as f32 / count as f32) / 1000.0
        } else {
            0.0
        }
    }
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// ONNX Runtime-backed regressor.
#[derive(Debug)]
pub struct OnnxRegressor {
    session: Mutex<Session>,
    model_path: String,
}

impl OnnxRegressor {
    /// Load the model from an ONNX file.
    pub fn load(model_path: &str) -> Result<Self, InferenceError> {
        tracing::info!("Loading ONNX model from: {}", model_path);

        if !std::path::Path::new(model_path).exists() {
            return Err(InferenceError(format!("Model not found: {}", model_path)));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

        tracing::info!("ONNX model loaded successfully");

        Ok(Self {
            session: Mutex::new(session),
            model_path: model_path.to_string(),
        })
    }
}

impl Regressor for OnnxRegressor {
    /// Run the session on one feature vector, shape (1, n).
    fn predict(&self, features: &[f32]) -> Result<f32, InferenceError> {
        let mut session = self.session.lock();

        let input_array = Array2::<f32>::from_shape_vec(
            (1, features.len()),
            features.to_vec(),
        ).map_err(|e| InferenceError(format!("Array error: {}", e)))?;

        // Get output name BEFORE run to avoid borrow conflict
        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError("No output defined".to_string()))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&output_name)
            .ok_or_else(|| InferenceError("No output from model".to_string()))?;

        let output_tensor = output.try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("Failed to extract output: {}", e)))?;

        output_tensor.1.first().copied()
            .ok_or_else(|| InferenceError("Empty output tensor".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_start_empty() {
        let stats = EngineStats::new();
        assert_eq!(stats.inference_count(), 0);
        assert_eq!(stats.avg_latency_ms(), 0.0);
    }

    #[test]
    fn test_stats_average() {
        let stats = EngineStats::new();
        stats.record(1_000);
        stats.record(3_000);

        assert_eq!(stats.inference_count(), 2);
        assert!((stats.avg_latency_ms() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_missing_model_fails() {
        let err = OnnxRegressor::load("does/not/exist.onnx").unwrap_err();
        assert!(err.to_string().contains("Model not found"));
    }
}
