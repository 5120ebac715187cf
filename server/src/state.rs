//! Application state for the plant disease server
//!
//! The catalog is compiled into the core crate and the model is loaded once
//! at startup; both are read-only for the process lifetime. The model slot
//! holds `None` in degraded mode.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use plant_disease_ml::{
    predict, Classifier, PipelineError, PredictionResult, DEFAULT_TOP_K, MAX_IMAGE_BYTES,
};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Path the model artifact was (or should have been) loaded from
    pub model_path: PathBuf,
    /// Number of ranked predictions per response
    pub top_k: usize,
    /// Upper bound on accepted image payloads
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model/plant_disease_model.onnx"),
            top_k: DEFAULT_TOP_K,
            max_upload_bytes: MAX_IMAGE_BYTES,
        }
    }
}

/// Shared application state
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Loaded classifier, or `None` in degraded mode. The ONNX session needs
    /// exclusive access per run, so concurrent requests serialize here.
    model: Mutex<Option<Box<dyn Classifier>>>,
    /// Server start time
    started_at: Instant,
}

impl AppState {
    pub fn new(config: ServerConfig, model: Option<Box<dyn Classifier>>) -> Self {
        Self {
            config,
            model: Mutex::new(model),
            started_at: Instant::now(),
        }
    }

    /// Whether a model is currently loaded
    pub fn model_status(&self) -> &'static str {
        match self.model.lock() {
            Ok(guard) if guard.is_some() => "loaded",
            _ => "not loaded",
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Run the full inference pipeline on raw uploaded bytes
    pub fn predict_bytes(&self, bytes: &[u8]) -> Result<PredictionResult, PipelineError> {
        let mut guard = self
            .model
            .lock()
            .map_err(|_| PipelineError::Model("model lock poisoned".to_string()))?;

        match guard.as_mut() {
            None => Err(PipelineError::ModelUnavailable),
            Some(model) => predict(model.as_mut(), bytes, self.config.top_k),
        }
    }
}

pub type SharedState = Arc<AppState>;

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use ndarray::Array4;
    use plant_disease_ml::NUM_CLASSES;
    use std::io::Cursor;

    struct StubClassifier(Vec<f32>);

    impl Classifier for StubClassifier {
        fn infer(&mut self, _input: Array4<f32>) -> plant_disease_ml::Result<Vec<f32>> {
            Ok(self.0.clone())
        }
    }

    fn png_bytes() -> Vec<u8> {
        let img = RgbImage::from_pixel(4, 4, Rgb([0, 255, 0]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_degraded_mode_reports_not_loaded() {
        let state = AppState::new(ServerConfig::default(), None);
        assert_eq!(state.model_status(), "not loaded");

        let err = state.predict_bytes(&png_bytes()).unwrap_err();
        assert!(matches!(err, PipelineError::ModelUnavailable));
    }

    #[test]
    fn test_loaded_model_serves_predictions() {
        let mut probs = vec![0.0; NUM_CLASSES];
        probs[20] = 0.95;
        let state = AppState::new(
            ServerConfig::default(),
            Some(Box::new(StubClassifier(probs))),
        );

        assert_eq!(state.model_status(), "loaded");
        let result = state.predict_bytes(&png_bytes()).unwrap();
        assert_eq!(result.entries.len(), DEFAULT_TOP_K);
        assert_eq!(result.primary().class_name, "Potato___Early_blight");
    }
}
