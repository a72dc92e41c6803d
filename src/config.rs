//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Path to the ONNX regression model
    pub model_path: String,

    /// Path to the fitted label-encoder table (JSON)
    pub encoders_path: String,

    /// Path to the ordered training-column list (JSON)
    pub training_columns_path: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "models/price_model.onnx".to_string()),

            encoders_path: env::var("ENCODERS_PATH")
                .unwrap_or_else(|_| "models/label_encoders.json".to_string()),

            training_columns_path: env::var("TRAINING_COLUMNS_PATH")
                .unwrap_or_else(|_| "models/training_columns.json".to_string()),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
