//! Prediction endpoint - the request boundary of the inference pipeline
//!
//! All pipeline failures are recovered here and translated into the wire
//! error taxonomy; nothing escapes to crash the process. Internal failures
//! are logged with full detail server-side and surfaced to the caller as a
//! category plus a short message.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};

use plant_disease_ml::{PipelineError, PredictionEntry, MODEL_VERSION};

use crate::state::SharedState;

/// Successful prediction response
///
/// The primary prediction is flattened into the top level in addition to
/// appearing first in `predictions`; both come from the same ranking pass.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(flatten)]
    pub primary: PredictionEntry,
    pub predictions: Vec<PredictionEntry>,
    pub model_version: String,
}

/// Request-boundary error taxonomy
#[derive(Debug)]
pub enum ApiError {
    NoFileProvided,
    EmptyFilename,
    FileTooLarge,
    ModelUnavailable,
    DecodeFailure(String),
    Internal(String),
}

impl ApiError {
    /// Short machine-readable category reported to the caller
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::NoFileProvided => "no-file-provided",
            ApiError::EmptyFilename => "empty-filename",
            ApiError::FileTooLarge => "file-too-large",
            ApiError::ModelUnavailable => "model-unavailable",
            ApiError::DecodeFailure(_) => "decode-failure",
            ApiError::Internal(_) => "internal-prediction-error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NoFileProvided
            | ApiError::EmptyFilename
            | ApiError::FileTooLarge
            | ApiError::DecodeFailure(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> Option<String> {
        match self {
            ApiError::NoFileProvided => Some("No image file provided".to_string()),
            ApiError::EmptyFilename => Some("No file selected".to_string()),
            ApiError::FileTooLarge => Some("File size exceeds 10MB limit".to_string()),
            ApiError::ModelUnavailable => {
                Some("Model not loaded; place a trained model at the configured path".to_string())
            }
            ApiError::DecodeFailure(detail) => Some(detail.clone()),
            ApiError::Internal(_) => Some("Prediction failed".to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.category(),
            message: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Decode(e) => ApiError::DecodeFailure(e.to_string()),
            PipelineError::ModelUnavailable => ApiError::ModelUnavailable,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// POST /predict - Classify an uploaded leaf image
///
/// Expects a multipart body with a single `image` field. The size bound is
/// checked on the collected bytes so oversized uploads get the explicit
/// `file-too-large` category.
pub async fn predict(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<PredictResponse>, ApiError> {
    let mut image_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Internal(format!("malformed multipart body: {}", e)))?
    {
        if field.name() == Some("image") {
            if field.file_name().unwrap_or_default().is_empty() {
                return Err(ApiError::EmptyFilename);
            }
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::Internal(format!("failed to read upload: {}", e)))?;
            image_bytes = Some(data.to_vec());
            break;
        }
    }

    let bytes = image_bytes.ok_or(ApiError::NoFileProvided)?;
    if bytes.len() > state.config.max_upload_bytes {
        return Err(ApiError::FileTooLarge);
    }

    // The pipeline is synchronous and the ONNX run is CPU-bound; keep it off
    // the async workers.
    let worker_state = state.clone();
    let result = tokio::task::spawn_blocking(move || worker_state.predict_bytes(&bytes))
        .await
        .map_err(|e| {
            error!("Prediction task failed: {}", e);
            ApiError::Internal(format!("prediction task failed: {}", e))
        })?
        .map_err(|e| {
            match &e {
                PipelineError::Decode(detail) => debug!("Rejected undecodable upload: {}", detail),
                PipelineError::ModelUnavailable => debug!("Prediction refused: model not loaded"),
                other => error!("Prediction error: {}", other),
            }
            ApiError::from(e)
        })?;

    let primary = result.primary().clone();
    Ok(Json(PredictResponse {
        success: true,
        primary,
        predictions: result.entries,
        model_version: MODEL_VERSION.to_string(),
    }))
}
