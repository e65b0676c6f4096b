//! Loan and savings products

use serde::{Deserialize, Serialize};

/// Product category (loans, savings, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: i64,
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default)]
    pub product_count: i64,
    #[serde(default)]
    pub products: Option<Vec<Product>>,
}

/// Loan or savings product. Amounts, rates and periods are free-form
/// display strings on the wire, not numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub product_category_id: i64,
    pub name: String,
    pub slug: Option<String>,
    pub max_amount: Option<String>,
    pub description: Option<String>,
    pub repayment_period: Option<String>,
    pub interest_rate: Option<String>,
    pub icon_class: Option<String>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<ProductFeature>>,
}

/// Bullet-point feature line attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFeature {
    pub id: i64,
    pub product_id: i64,
    pub feature_text: String,
    #[serde(default)]
    pub display_order: i64,
}
