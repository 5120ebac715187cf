//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use plant_disease_ml::MODEL_VERSION;

use crate::state::SharedState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub model_status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// GET /health - Health check endpoint
///
/// Reports whether the model is loaded, independent of request processing.
pub async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        service: "Plant Disease ML Service".to_string(),
        model_status: state.model_status().to_string(),
        version: MODEL_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}
