//! Product management (/admin): loan/savings products and their categories
//!
//! Both resources are JSON endpoints; product features travel as a string
//! list that the backend materializes into rows.

use anyhow::Result;
use serde_json::{json, Map, Value};

use super::client::SaccoClient;
use super::error::ApiError;
use super::Ack;
use crate::models::{Product, ProductCategory};

impl SaccoClient {
    pub async fn list_product_categories(&self) -> Result<Vec<ProductCategory>, ApiError> {
        self.get("/admin/product-categories").await
    }

    pub async fn create_product_category(&self, body: Value) -> Result<ProductCategory, ApiError> {
        self.post("/admin/product-categories", body).await
    }

    pub async fn update_product_category(
        &self,
        id: i64,
        body: Value,
    ) -> Result<ProductCategory, ApiError> {
        self.put(&format!("/admin/product-categories/{id}"), body)
            .await
    }

    pub async fn delete_product_category(&self, id: i64) -> Result<Ack, ApiError> {
        self.delete(&format!("/admin/product-categories/{id}")).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get("/admin/products").await
    }

    pub async fn create_product(&self, body: Value) -> Result<Product, ApiError> {
        self.post("/admin/products", body).await
    }

    pub async fn update_product(&self, id: i64, body: Value) -> Result<Product, ApiError> {
        self.put(&format!("/admin/products/{id}"), body).await
    }

    pub async fn delete_product(&self, id: i64) -> Result<Ack, ApiError> {
        self.delete(&format!("/admin/products/{id}")).await
    }
}

// -- CLI commands --

/// Product category create/update fields.
#[derive(Debug, clap::Args)]
pub struct CategoryFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub slug: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub display_order: Option<i64>,
}

fn category_body(fields: &CategoryFields) -> Value {
    let mut body = Map::new();
    if let Some(v) = &fields.name {
        body.insert("name".into(), json!(v));
    }
    if let Some(v) = &fields.slug {
        body.insert("slug".into(), json!(v));
    }
    if let Some(v) = &fields.description {
        body.insert("description".into(), json!(v));
    }
    if let Some(v) = fields.display_order {
        body.insert("display_order".into(), json!(v));
    }
    Value::Object(body)
}

pub async fn list_categories() -> Result<()> {
    let client = super::client()?;
    let categories = client.list_product_categories().await?;

    println!("\nProduct categories:");
    println!("{:-<60}", "");
    if categories.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for category in &categories {
        println!(
            "[{}] {} ({} products)",
            category.id, category.name, category.product_count
        );
    }
    Ok(())
}

pub async fn create_category(fields: CategoryFields) -> Result<()> {
    let client = super::client()?;
    let category = client.create_product_category(category_body(&fields)).await?;
    println!("Created category {} ({})", category.id, category.name);
    Ok(())
}

pub async fn update_category(id: i64, fields: CategoryFields) -> Result<()> {
    let client = super::client()?;
    let category = client
        .update_product_category(id, category_body(&fields))
        .await?;
    println!("Updated category {}", category.id);
    Ok(())
}

pub async fn delete_category(id: i64) -> Result<()> {
    let client = super::client()?;
    client.delete_product_category(id).await?;
    println!("Deleted category {}", id);
    Ok(())
}

/// Product create/update fields.
#[derive(Debug, clap::Args)]
pub struct ProductFields {
    #[arg(long)]
    pub category_id: Option<i64>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub slug: Option<String>,
    /// Display string, e.g. "KSh 500,000"
    #[arg(long)]
    pub max_amount: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Display string, e.g. "12 months"
    #[arg(long)]
    pub repayment_period: Option<String>,
    /// Display string, e.g. "1% per month"
    #[arg(long)]
    pub interest_rate: Option<String>,
    #[arg(long)]
    pub icon_class: Option<String>,
    #[arg(long)]
    pub popular: Option<bool>,
    #[arg(long)]
    pub display_order: Option<i64>,
    #[arg(long)]
    pub active: Option<bool>,
    /// Feature line; repeat the flag for multiple features
    #[arg(long = "feature")]
    pub features: Vec<String>,
}

fn product_body(fields: &ProductFields) -> Value {
    let mut body = Map::new();
    if let Some(v) = fields.category_id {
        body.insert("product_category_id".into(), json!(v));
    }
    if let Some(v) = &fields.name {
        body.insert("name".into(), json!(v));
    }
    if let Some(v) = &fields.slug {
        body.insert("slug".into(), json!(v));
    }
    if let Some(v) = &fields.max_amount {
        body.insert("max_amount".into(), json!(v));
    }
    if let Some(v) = &fields.description {
        body.insert("description".into(), json!(v));
    }
    if let Some(v) = &fields.repayment_period {
        body.insert("repayment_period".into(), json!(v));
    }
    if let Some(v) = &fields.interest_rate {
        body.insert("interest_rate".into(), json!(v));
    }
    if let Some(v) = &fields.icon_class {
        body.insert("icon_class".into(), json!(v));
    }
    if let Some(v) = fields.popular {
        body.insert("is_popular".into(), json!(v));
    }
    if let Some(v) = fields.display_order {
        body.insert("display_order".into(), json!(v));
    }
    if let Some(v) = fields.active {
        body.insert("is_active".into(), json!(v));
    }
    if !fields.features.is_empty() {
        body.insert("features".into(), json!(fields.features));
    }
    Value::Object(body)
}

pub async fn list_products() -> Result<()> {
    let client = super::client()?;
    let products = client.list_products().await?;

    println!("\nProducts:");
    println!("{:-<60}", "");
    if products.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for product in &products {
        let mark = if product.is_popular { " *" } else { "" };
        println!("[{}] {}{}", product.id, product.name, mark);
        if let Some(amount) = &product.max_amount {
            println!("  max amount: {}", amount);
        }
        if let Some(rate) = &product.interest_rate {
            println!("  rate:       {}", rate);
        }
        if let Some(features) = &product.features {
            for feature in features {
                println!("    - {}", feature.feature_text);
            }
        }
    }
    Ok(())
}

pub async fn create_product(fields: ProductFields) -> Result<()> {
    let client = super::client()?;
    let product = client.create_product(product_body(&fields)).await?;
    println!("Created product {} ({})", product.id, product.name);
    Ok(())
}

pub async fn update_product(id: i64, fields: ProductFields) -> Result<()> {
    let client = super::client()?;
    let product = client.update_product(id, product_body(&fields)).await?;
    println!("Updated product {}", product.id);
    Ok(())
}

pub async fn delete_product(id: i64) -> Result<()> {
    let client = super::client()?;
    client.delete_product(id).await?;
    println!("Deleted product {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_body_carries_feature_list() {
        let fields = ProductFields {
            category_id: Some(2),
            name: Some("Emergency Loan".to_string()),
            slug: None,
            max_amount: None,
            description: None,
            repayment_period: None,
            interest_rate: None,
            icon_class: None,
            popular: Some(true),
            display_order: None,
            active: None,
            features: vec!["Same-day approval".to_string(), "No guarantor".to_string()],
        };
        assert_eq!(
            product_body(&fields),
            json!({
                "product_category_id": 2,
                "name": "Emergency Loan",
                "is_popular": true,
                "features": ["Same-day approval", "No guarantor"]
            })
        );
    }
}
