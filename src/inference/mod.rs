//! Inference pipeline for plant disease prediction
//!
//! This module provides:
//! - Image normalization into the model's input tensor
//! - The `Classifier` capability and its ONNX Runtime adapter
//! - Top-k ranking of the model's probability vector
//!
//! The pipeline has no cross-request state and no retries: a decode failure
//! or shape mismatch is reported once per request by value.

pub mod classifier;
pub mod preprocess;
pub mod ranker;

// Re-export main types for convenience
pub use classifier::{Classifier, OnnxClassifier};
pub use preprocess::normalize;
pub use ranker::{rank, PredictionEntry, PredictionResult};

use crate::catalog::CLASS_NAMES;
use crate::error::Result;

/// Default number of ranked predictions returned per request
pub const DEFAULT_TOP_K: usize = 3;

/// Run the full pipeline on raw image bytes: normalize, invoke the
/// classifier, and rank the resulting probabilities against the catalog.
pub fn predict(
    classifier: &mut dyn Classifier,
    image_bytes: &[u8],
    k: usize,
) -> Result<PredictionResult> {
    let tensor = preprocess::normalize(image_bytes)?;
    let probabilities = classifier.infer(tensor)?;
    ranker::rank(&probabilities, &CLASS_NAMES, k)
}
