//! AutoValue Inference API
//!
//! HTTP service exposing a pre-trained vehicle price regression model.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     AUTOVALUE API                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌────────────────────────────────────────┐  │
//! │  │  API      │  │  Inference Pipeline                    │  │
//! │  │  Gateway  │──│  derive → encode → align → predict     │  │
//! │  │  (Axum)   │  │  → expm1                               │  │
//! │  └───────────┘  └──────────────────┬─────────────────────┘  │
//! │                                    ▼                         │
//! │              ┌──────────────────────────────────┐            │
//! │              │ Artifacts (read-only, load-once) │            │
//! │              │ model.onnx · encoders · columns  │            │
//! │              └──────────────────────────────────┘            │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod artifacts;
mod pipeline;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "autovalue_api=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("AutoValue Inference API starting...");
    tracing::info!("Model: {}", config.model_path);

    // Load read-only artifacts once, before any request can arrive
    let artifacts = artifacts::Artifacts::load(&config)
        .expect("Failed to load inference artifacts");

    // Build application state
    let state = AppState {
        artifacts: Arc::new(artifacts),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<artifacts::Artifacts>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/status", get(handlers::status::engine_status))
        .route("/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
