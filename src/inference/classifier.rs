//! Classifier capability and the ONNX Runtime adapter
//!
//! The pipeline depends only on the [`Classifier`] trait: one operation that
//! maps a normalized input tensor to a probability vector. The concrete
//! runtime lives behind [`OnnxClassifier`]; nothing else in the crate touches
//! runtime internals.

use std::path::Path;

use ndarray::Array4;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use tracing::info;

use crate::error::{PipelineError, Result};

/// A classification model exposing a single inference operation
///
/// `infer` takes `&mut self` because some runtimes (including ONNX Runtime
/// sessions) require exclusive access per run; callers that share a
/// classifier across threads must serialize invocations.
pub trait Classifier: Send {
    /// Run the model on a normalized `[1, H, W, 3]` tensor and return its
    /// raw output as a flat probability vector.
    fn infer(&mut self, input: Array4<f32>) -> Result<Vec<f32>>;
}

/// Adapter over an ONNX Runtime session
///
/// The exported model's final layer is a softmax, so the output tensor is
/// consumed as-is: a probability distribution over the catalog classes.
pub struct OnnxClassifier {
    session: Session,
    input_name: String,
}

impl OnnxClassifier {
    /// Load a model from an ONNX artifact on disk
    ///
    /// Fails with [`PipelineError::Model`] if the artifact is missing or not
    /// a loadable model; the caller decides whether that is fatal (the
    /// server keeps running in degraded mode).
    pub fn load(path: &Path) -> Result<Self> {
        let _ = ort::init().with_name("plant-disease-ml").commit();

        let session = Session::builder()
            .map_err(|e| PipelineError::Model(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| PipelineError::Model(e.to_string()))?
            .with_intra_threads(4)
            .map_err(|e| PipelineError::Model(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e| PipelineError::Model(format!("failed to load {:?}: {}", path, e)))?;

        let input_name = session
            .inputs()
            .first()
            .map(|input| input.name().to_string())
            .ok_or_else(|| PipelineError::Model("model declares no inputs".to_string()))?;

        info!("Model loaded from {:?} (input: {})", path, input_name);

        Ok(Self {
            session,
            input_name,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn infer(&mut self, input: Array4<f32>) -> Result<Vec<f32>> {
        let tensor =
            Value::from_array(input).map_err(|e| PipelineError::Model(e.to_string()))?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => tensor])
            .map_err(|e| PipelineError::Model(format!("inference failed: {}", e)))?;

        let output = outputs
            .values()
            .next()
            .ok_or_else(|| PipelineError::Model("model produced no outputs".to_string()))?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| PipelineError::Model(format!("failed to extract output: {}", e)))?;

        Ok(data.to_vec())
    }
}
