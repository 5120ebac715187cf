//! Top-k ranking of model output probabilities
//!
//! Selects the k most probable classes from an index-aligned probability
//! vector and resolves each into its catalog identity. Ties on confidence
//! are broken deterministically: the lower class index wins.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::{derive_disease_id, parse_label};
use crate::error::{PipelineError, Result};

/// A single ranked prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionEntry {
    /// Canonical machine identifier for the (plant, disease) pair
    #[serde(rename = "diseaseId")]
    pub disease_id: String,

    /// Raw class label from the catalog
    pub class_name: String,

    /// Human-readable plant name
    pub plant: String,

    /// Human-readable disease name
    pub disease: String,

    /// Model probability for this class, in [0, 1]
    pub confidence: f32,
}

/// Ranked predictions for one inference, highest confidence first
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub entries: Vec<PredictionEntry>,
}

impl PredictionResult {
    /// The primary (highest-confidence) prediction
    ///
    /// `rank` never returns an empty result, so this cannot fail for
    /// results produced by the pipeline.
    pub fn primary(&self) -> &PredictionEntry {
        &self.entries[0]
    }
}

/// Rank a probability vector against the given catalog labels
///
/// Returns `min(k, labels.len())` entries ordered descending by confidence,
/// lower class index first on exact ties. Confidences are copied verbatim
/// from the input; the vector is assumed to already be a probability
/// distribution and is not renormalized.
///
/// Fails with [`PipelineError::ShapeMismatch`] when the vector length does
/// not match the catalog size; no partial result is produced.
pub fn rank(probabilities: &[f32], labels: &[&str], k: usize) -> Result<PredictionResult> {
    if probabilities.len() != labels.len() {
        return Err(PipelineError::ShapeMismatch {
            expected: labels.len(),
            got: probabilities.len(),
        });
    }

    let mut indexed: Vec<(usize, f32)> = probabilities.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let entries = indexed
        .iter()
        .take(k)
        .map(|&(index, confidence)| {
            let class_name = labels[index];
            let (plant, disease) = parse_label(class_name);
            let disease_id = derive_disease_id(&plant, &disease);
            PredictionEntry {
                disease_id,
                class_name: class_name.to_string(),
                plant,
                disease,
                confidence,
            }
        })
        .collect();

    Ok(PredictionResult { entries })
}
