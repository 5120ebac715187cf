//! # Plant Disease Classification Core
//!
//! Inference pipeline for plant leaf disease classification over the
//! PlantVillage class catalog. The pipeline is a single-pass, stateless
//! transformation per request:
//!
//! raw image bytes → [`inference::preprocess::normalize`] → tensor →
//! [`inference::Classifier`] → probability vector →
//! [`inference::ranker::rank`] → ranked predictions.
//!
//! ## Modules
//!
//! - `catalog`: the fixed 38-class label catalog and label parsing
//! - `inference`: image normalization, the classifier capability, and
//!   top-k ranking
//! - `error`: error types shared across the pipeline
//!
//! The catalog and a loaded model are the only process-wide state; both are
//! read-only after startup, so the pipeline is safe to call from concurrent
//! call sites as long as the model invocation itself is serialized by the
//! caller.

pub mod catalog;
pub mod error;
pub mod inference;

// Re-export commonly used items for convenience
pub use catalog::{class_index, class_name, derive_disease_id, parse_label, CatalogEntry};
pub use error::{PipelineError, Result};
pub use inference::classifier::{Classifier, OnnxClassifier};
pub use inference::ranker::{PredictionEntry, PredictionResult};
pub use inference::{predict, DEFAULT_TOP_K};

/// Number of classes in the PlantVillage catalog
pub const NUM_CLASSES: usize = 38;

/// Model input resolution (images are resized to IMAGE_SIZE x IMAGE_SIZE)
pub const IMAGE_SIZE: usize = 224;

/// Upper bound on accepted image payloads (10 MiB)
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Version string reported alongside predictions
pub const MODEL_VERSION: &str = "1.0.0";
