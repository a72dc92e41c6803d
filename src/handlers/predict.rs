//! Price prediction handler

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppResult;
use crate::pipeline;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_price: f32,
}

/// `POST /predict` - run the inference pipeline on one record.
///
/// The body is a flat JSON object; whatever fields the encoders and the
/// training schema do not know about are ignored downstream.
pub async fn predict(
    State(state): State<AppState>,
    Json(record): Json<Map<String, Value>>,
) -> AppResult<Json<PredictResponse>> {
    let predicted_price = pipeline::predict_price(&state.artifacts, &record)?;

    Ok(Json(PredictResponse { predicted_price }))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::artifacts::Artifacts;
    use crate::config::Config;
    use crate::create_router;
    use crate::pipeline::{
        EncoderTable, InferenceError, LabelEncoder, Regressor, TrainingColumns,
    };
    use crate::AppState;

    struct FixedRegressor(f32);

    impl Regressor for FixedRegressor {
        fn predict(&self, _features: &[f32]) -> Result<f32, InferenceError> {
            Ok(self.0)
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    fn test_state(log_price: f32) -> AppState {
        let encoders = EncoderTable::new(HashMap::from([(
            "Brand".to_string(),
            LabelEncoder::new(HashMap::from([("Toyota".to_string(), 3)])),
        )]));

        let columns = TrainingColumns::new(vec![
            "HorsePower".to_string(),
            "Torque".to_string(),
            "Accel_Efficiency".to_string(),
            "Brand".to_string(),
            "HorsePower_Torque".to_string(),
            "HorsePower_Accel_Efficiency".to_string(),
        ]);

        AppState {
            artifacts: Arc::new(Artifacts::new(
                Box::new(FixedRegressor(log_price)),
                encoders,
                columns,
            )),
            config: Config::from_env(),
        }
    }

    async fn post_predict(state: AppState, body: &str) -> (StatusCode, serde_json::Value) {
        let response = create_router(state)
            .oneshot(
                Request::post("/predict")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_predict_known_category() {
        let (status, body) = post_predict(
            test_state(2.0),
            r#"{"HorsePower": 200, "Torque": 300, "Accel_Efficiency": 1.5, "Brand": "Toyota"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let price = body["predicted_price"].as_f64().unwrap();
        assert!((price - (2.0f64.exp() - 1.0)).abs() < 1e-4);
    }

    #[tokio::test]
    async fn test_predict_unknown_category_still_succeeds() {
        let (status, body) = post_predict(
            test_state(2.0),
            r#"{"HorsePower": 200, "Torque": 300, "Accel_Efficiency": 1.5, "Brand": "UnknownMake"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["predicted_price"].is_number());
    }

    #[tokio::test]
    async fn test_predict_missing_field_is_bad_request() {
        let (status, body) = post_predict(
            test_state(2.0),
            r#"{"Torque": 300, "Accel_Efficiency": 1.5, "Brand": "Toyota"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("HorsePower"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_router(test_state(0.0))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_status_counts_predictions() {
        let state = test_state(1.0);

        let _ = post_predict(
            state.clone(),
            r#"{"HorsePower": 100, "Torque": 200, "Accel_Efficiency": 1.0}"#,
        )
        .await;

        let response = create_router(state)
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["inference_count"].as_u64(), Some(1));
    }
}
