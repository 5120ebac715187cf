//! Error types for the inference pipeline.
//!
//! Every stage reports failure by value; nothing in the pipeline panics on
//! malformed input. The request boundary translates these into the wire-level
//! error categories.

use thiserror::Error;

/// Errors produced by the inference pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The uploaded bytes are not a decodable image
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The model emitted a probability vector that does not match the catalog
    #[error("probability vector has {got} entries, expected {expected}")]
    ShapeMismatch { expected: usize, got: usize },

    /// No model is loaded (service is running in degraded mode)
    #[error("model is not loaded")]
    ModelUnavailable,

    /// The model runtime failed to load or run
    #[error("model error: {0}")]
    Model(String),

    /// Tensor assembly failed during preprocessing
    #[error("preprocessing failed: {0}")]
    Preprocess(String),
}

/// Convenience Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let err = PipelineError::ShapeMismatch {
            expected: 38,
            got: 4,
        };
        assert_eq!(
            format!("{}", err),
            "probability vector has 4 entries, expected 38"
        );
    }

    #[test]
    fn test_model_unavailable_display() {
        let err = PipelineError::ModelUnavailable;
        assert_eq!(format!("{}", err), "model is not loaded");
    }
}
