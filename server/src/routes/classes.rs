//! Class catalog endpoint - pure projection of the label catalog

use axum::Json;
use serde::Serialize;

use plant_disease_ml::catalog::{self, CatalogEntry};

#[derive(Serialize)]
pub struct ClassesResponse {
    pub success: bool,
    pub total_classes: usize,
    pub classes: Vec<CatalogEntry>,
}

/// GET /classes - List all supported plant disease classes
pub async fn list_classes() -> Json<ClassesResponse> {
    let classes = catalog::entries();
    Json(ClassesResponse {
        success: true,
        total_classes: classes.len(),
        classes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_classes() {
        let Json(response) = list_classes().await;
        assert!(response.success);
        assert_eq!(response.total_classes, 38);
        assert_eq!(response.classes[0].class_name, "Apple___Apple_scab");
    }
}
