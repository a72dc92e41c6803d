//! Engine status handler

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

/// Engine Status for dashboards
#[derive(Debug, Serialize)]
pub struct EngineStatusResponse {
    pub model_name: String,
    pub inference_device: String,
    pub feature_count: usize,
    pub encoder_count: usize,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
    pub loaded_at: DateTime<Utc>,
}

pub async fn engine_status(State(state): State<AppState>) -> Json<EngineStatusResponse> {
    let artifacts = &state.artifacts;

    Json(EngineStatusResponse {
        model_name: artifacts.model.model_name().to_string(),
        inference_device: "ONNX Runtime (CPU)".to_string(),
        feature_count: artifacts.columns.len(),
        encoder_count: artifacts.encoders.len(),
        inference_count: artifacts.stats.inference_count(),
        avg_latency_ms: artifacts.stats.avg_latency_ms(),
        loaded_at: artifacts.loaded_at,
    })
}
