//! Label catalog for the PlantVillage disease classes
//!
//! The catalog is a fixed, ordered table of 38 class labels. Its order is
//! load-time fixed and must exactly match the index order the model was
//! trained against; the probability vector the model emits is index-aligned
//! with this table and is never reordered.
//!
//! Labels follow the `Plant___Disease` convention (triple underscore
//! separator, underscores for spaces inside each half).

use serde::{Deserialize, Serialize};

/// Separator between the plant and disease halves of a class label
pub const LABEL_SEPARATOR: &str = "___";

/// Class names for the PlantVillage catalog (38 classes)
///
/// Format: "Plant___Disease" or "Plant___healthy".
pub const CLASS_NAMES: [&str; 38] = [
    "Apple___Apple_scab",
    "Apple___Black_rot",
    "Apple___Cedar_apple_rust",
    "Apple___healthy",
    "Blueberry___healthy",
    "Cherry_(including_sour)___Powdery_mildew",
    "Cherry_(including_sour)___healthy",
    "Corn_(maize)___Cercospora_leaf_spot Gray_leaf_spot",
    "Corn_(maize)___Common_rust_",
    "Corn_(maize)___Northern_Leaf_Blight",
    "Corn_(maize)___healthy",
    "Grape___Black_rot",
    "Grape___Esca_(Black_Measles)",
    "Grape___Leaf_blight_(Isariopsis_Leaf_Spot)",
    "Grape___healthy",
    "Orange___Haunglongbing_(Citrus_greening)",
    "Peach___Bacterial_spot",
    "Peach___healthy",
    "Pepper,_bell___Bacterial_spot",
    "Pepper,_bell___healthy",
    "Potato___Early_blight",
    "Potato___Late_blight",
    "Potato___healthy",
    "Raspberry___healthy",
    "Soybean___healthy",
    "Squash___Powdery_mildew",
    "Strawberry___Leaf_scorch",
    "Strawberry___healthy",
    "Tomato___Bacterial_spot",
    "Tomato___Early_blight",
    "Tomato___Late_blight",
    "Tomato___Leaf_Mold",
    "Tomato___Septoria_leaf_spot",
    "Tomato___Spider_mites Two-spotted_spider_mite",
    "Tomato___Target_Spot",
    "Tomato___Tomato_Yellow_Leaf_Curl_Virus",
    "Tomato___Tomato_mosaic_virus",
    "Tomato___healthy",
];

/// A catalog entry projected into human-readable plant and disease names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub class_name: String,
    pub plant: String,
    pub disease: String,
}

/// Get the class name for a given label index
pub fn class_name(index: usize) -> Option<&'static str> {
    CLASS_NAMES.get(index).copied()
}

/// Get the label index for a given class name
pub fn class_index(name: &str) -> Option<usize> {
    CLASS_NAMES.iter().position(|&n| n == name)
}

/// Split a class label into human-readable (plant, disease) names
///
/// Splits on the first `___`; underscores inside each half become spaces.
/// A label without the separator yields the whole label as the plant name
/// and the sentinel "Unknown" as the disease. Total over any label string.
pub fn parse_label(label: &str) -> (String, String) {
    match label.split_once(LABEL_SEPARATOR) {
        Some((plant, disease)) => (plant.replace('_', " "), disease.replace('_', " ")),
        None => (label.replace('_', " "), "Unknown".to_string()),
    }
}

/// Derive the canonical machine identifier for a (plant, disease) pair
///
/// Lowercases both names and turns spaces into underscores; commas and
/// parentheses are stripped from the plant half only. Deterministic and
/// locale-independent; across the fixed catalog all derived ids are
/// pairwise distinct (enforced by test).
pub fn derive_disease_id(plant: &str, disease: &str) -> String {
    let plant_clean = plant
        .to_lowercase()
        .replace(' ', "_")
        .replace([',', '(', ')'], "");
    let disease_clean = disease.to_lowercase().replace(' ', "_");
    format!("{plant_clean}{LABEL_SEPARATOR}{disease_clean}")
}

/// Project the full catalog into `{class_name, plant, disease}` entries
///
/// Order matches the catalog (and therefore the model's output indices).
pub fn entries() -> Vec<CatalogEntry> {
    CLASS_NAMES
        .iter()
        .map(|&name| {
            let (plant, disease) = parse_label(name);
            CatalogEntry {
                class_name: name.to_string(),
                plant,
                disease,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_class_name() {
        assert_eq!(class_name(0), Some("Apple___Apple_scab"));
        assert_eq!(class_name(37), Some("Tomato___healthy"));
        assert_eq!(class_name(38), None);
    }

    #[test]
    fn test_class_index() {
        assert_eq!(class_index("Apple___Apple_scab"), Some(0));
        assert_eq!(class_index("Tomato___healthy"), Some(37));
        assert_eq!(class_index("Nonexistent___class"), None);
    }

    #[test]
    fn test_parse_label_basic() {
        let (plant, disease) = parse_label("Apple___Apple_scab");
        assert_eq!(plant, "Apple");
        assert_eq!(disease, "Apple scab");
    }

    #[test]
    fn test_parse_label_punctuation() {
        let (plant, disease) = parse_label("Pepper,_bell___Bacterial_spot");
        assert_eq!(plant, "Pepper, bell");
        assert_eq!(disease, "Bacterial spot");

        // This label carries a literal space in the disease half
        let (plant, disease) = parse_label("Corn_(maize)___Cercospora_leaf_spot Gray_leaf_spot");
        assert_eq!(plant, "Corn (maize)");
        assert_eq!(disease, "Cercospora leaf spot Gray leaf spot");
    }

    #[test]
    fn test_parse_label_missing_separator() {
        let (plant, disease) = parse_label("Background_without_leaves");
        assert_eq!(plant, "Background without leaves");
        assert_eq!(disease, "Unknown");
    }

    #[test]
    fn test_parse_round_trip() {
        // Parsing then re-deriving must stay consistent with the original
        // label modulo underscore/space substitution and plant punctuation.
        for name in CLASS_NAMES {
            let (plant, disease) = parse_label(name);
            let (prefix, suffix) = name.split_once(LABEL_SEPARATOR).unwrap();
            assert_eq!(plant.replace(' ', "_"), prefix.replace(' ', "_"));
            assert_eq!(disease, suffix.replace('_', " "));
        }
    }

    #[test]
    fn test_derive_disease_id() {
        assert_eq!(
            derive_disease_id("Apple", "Apple scab"),
            "apple___apple_scab"
        );
        // Commas and parentheses are stripped from the plant half only
        assert_eq!(
            derive_disease_id("Pepper, bell", "Bacterial spot"),
            "pepper_bell___bacterial_spot"
        );
        assert_eq!(
            derive_disease_id("Grape", "Esca (Black Measles)"),
            "grape___esca_(black_measles)"
        );
    }

    #[test]
    fn test_derive_disease_id_deterministic() {
        let first = derive_disease_id("Corn (maize)", "Common rust ");
        let second = derive_disease_id("Corn (maize)", "Common rust ");
        assert_eq!(first, second);
    }

    #[test]
    fn test_disease_ids_pairwise_distinct() {
        let ids: HashSet<String> = CLASS_NAMES
            .iter()
            .map(|&name| {
                let (plant, disease) = parse_label(name);
                derive_disease_id(&plant, &disease)
            })
            .collect();
        assert_eq!(ids.len(), CLASS_NAMES.len());
    }

    #[test]
    fn test_entries_projection() {
        let all = entries();
        assert_eq!(all.len(), 38);
        assert_eq!(all[0].class_name, "Apple___Apple_scab");
        assert_eq!(all[0].plant, "Apple");
        assert_eq!(all[0].disease, "Apple scab");
        assert_eq!(all[37].disease, "healthy");
    }
}
