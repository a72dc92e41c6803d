//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::pipeline::{InferenceError, PipelineError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Input errors
    MissingField(String),
    NonNumericField(String),
    NonNumericColumn(String),

    // Inference errors
    InferenceError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("Missing required field: {}", field),
            ),
            AppError::NonNumericField(field) => (
                StatusCode::BAD_REQUEST,
                format!("Field is not numeric: {}", field),
            ),
            AppError::NonNumericColumn(column) => (
                StatusCode::BAD_REQUEST,
                format!("Column is not numeric after encoding: {}", column),
            ),
            AppError::InferenceError(msg) => {
                tracing::error!("Inference error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Model inference failed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::MissingField(field) => AppError::MissingField(field),
            PipelineError::NonNumericField(field) => AppError::NonNumericField(field),
            PipelineError::NonNumericColumn(column) => AppError::NonNumericColumn(column),
            PipelineError::Inference(e) => AppError::InferenceError(e.to_string()),
        }
    }
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        AppError::InferenceError(err.to_string())
    }
}
