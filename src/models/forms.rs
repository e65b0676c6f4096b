//! Downloadable member forms

use serde::{Deserialize, Serialize};

/// Downloadable form (membership application, loan forms, ...). Size and
/// type are computed server-side from the uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadableForm {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
    pub file_url: String,
    pub file_size: Option<String>,
    pub file_type: Option<String>,
    #[serde(default)]
    pub download_count: i64,
    pub upload_date: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, Product};

    #[test]
    fn test_form_from_backend_json() {
        let json = r#"{
            "id": 3,
            "title": "Membership Application",
            "category": "Membership",
            "file_url": "/static/uploads/forms/20240101_000000_membership.pdf",
            "file_size": "0.42 MB",
            "file_type": "PDF",
            "download_count": 17,
            "upload_date": "2024-01-01",
            "is_active": true,
            "created_at": "2024-01-01T08:30:00",
            "updated_at": null
        }"#;

        let form: DownloadableForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.id, 3);
        assert_eq!(form.file_type.as_deref(), Some("PDF"));
        assert_eq!(form.download_count, 17);
        assert!(form.updated_at.is_none());
    }

    #[test]
    fn test_department_without_staff_embed() {
        // Plain list responses carry staff_count but no staff_members key.
        let json = r#"{
            "id": 1,
            "name": "Finance",
            "slug": "finance",
            "description": null,
            "key_responsibilities": null,
            "icon_class": "fa-coins",
            "display_order": 1,
            "is_active": true,
            "created_at": null,
            "updated_at": null,
            "staff_count": 4
        }"#;

        let dept: Department = serde_json::from_str(json).unwrap();
        assert_eq!(dept.staff_count, 4);
        assert!(dept.staff_members.is_none());
    }

    #[test]
    fn test_product_with_features() {
        let json = r#"{
            "id": 9,
            "product_category_id": 2,
            "name": "Emergency Loan",
            "slug": "emergency-loan",
            "max_amount": "KSh 500,000",
            "description": "Fast processing",
            "repayment_period": "12 months",
            "interest_rate": "1% per month",
            "icon_class": null,
            "is_popular": true,
            "display_order": 0,
            "is_active": true,
            "created_at": null,
            "updated_at": null,
            "features": [
                {"id": 1, "product_id": 9, "feature_text": "Same-day approval", "display_order": 0}
            ]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.is_popular);
        let features = product.features.unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].feature_text, "Same-day approval");
    }
}
