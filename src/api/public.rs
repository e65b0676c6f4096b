//! Public site endpoints (/public)
//!
//! Unauthenticated reads backing the marketing pages. Several of them are
//! composite payloads assembled server-side for one page render.

use anyhow::Result;
use serde::Deserialize;

use super::client::SaccoClient;
use super::error::ApiError;
use crate::models::{
    AboutSection, Award, BoardMember, CoreValue, Department, DownloadableForm, NewsArticle,
    Product, ProductCategory, Slider, StaffMember,
};

#[derive(Debug, Deserialize)]
pub struct HomePage {
    #[serde(default)]
    pub sliders: Vec<Slider>,
    #[serde(default)]
    pub news: Vec<NewsArticle>,
    #[serde(default)]
    pub featured_products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub struct AboutPage {
    pub about_content: Option<AboutSection>,
    pub mission: Option<AboutSection>,
    pub vision: Option<AboutSection>,
    #[serde(default)]
    pub values: Vec<CoreValue>,
    #[serde(default)]
    pub awards: Vec<Award>,
}

/// Board page grouped by member category.
#[derive(Debug, Deserialize)]
pub struct BoardPage {
    #[serde(default)]
    pub executive: Vec<BoardMember>,
    #[serde(default)]
    pub board: Vec<BoardMember>,
    #[serde(default)]
    pub supervisory: Vec<BoardMember>,
}

#[derive(Debug, Deserialize)]
pub struct ProductsPage {
    #[serde(default)]
    pub categories: Vec<ProductCategory>,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadsPage {
    #[serde(default)]
    pub forms: Vec<DownloadableForm>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DepartmentDetail {
    pub department: Department,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
}

impl SaccoClient {
    pub async fn public_home(&self) -> Result<HomePage, ApiError> {
        self.get("/public/home").await
    }

    pub async fn public_about(&self) -> Result<AboutPage, ApiError> {
        self.get("/public/about").await
    }

    pub async fn public_departments(&self) -> Result<Vec<Department>, ApiError> {
        self.get("/public/departments").await
    }

    pub async fn public_department(&self, slug: &str) -> Result<DepartmentDetail, ApiError> {
        self.get(&format!("/public/departments/{slug}")).await
    }

    pub async fn public_board(&self) -> Result<BoardPage, ApiError> {
        self.get("/public/board").await
    }

    pub async fn public_products(&self, category: Option<&str>) -> Result<ProductsPage, ApiError> {
        match category {
            Some(slug) => {
                self.get_with("/public/products", &[("category", slug.to_string())])
                    .await
            }
            None => self.get("/public/products").await,
        }
    }

    pub async fn public_downloads(
        &self,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<DownloadsPage, ApiError> {
        let mut query = Vec::new();
        if let Some(category) = category {
            query.push(("category", category.to_string()));
        }
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        self.get_with("/public/downloads", &query).await
    }

    pub async fn public_news(&self) -> Result<Vec<NewsArticle>, ApiError> {
        self.get("/public/news").await
    }

    pub async fn public_news_item(&self, id: i64) -> Result<NewsArticle, ApiError> {
        self.get(&format!("/public/news/{id}")).await
    }
}

// -- CLI commands --

pub async fn home() -> Result<()> {
    let client = super::client()?;
    let page = client.public_home().await?;

    println!("\nHomepage:");
    println!("{:-<60}", "");
    println!("Sliders:");
    for slider in &page.sliders {
        println!(
            "  [{}] {}",
            slider.id,
            slider.title.as_deref().unwrap_or("(untitled)")
        );
    }
    println!("Latest news:");
    for article in &page.news {
        println!("  [{}] {}", article.id, article.title);
    }
    println!("Featured products:");
    for product in &page.featured_products {
        println!("  [{}] {}", product.id, product.name);
    }
    Ok(())
}

pub async fn about() -> Result<()> {
    let client = super::client()?;
    let page = client.public_about().await?;

    println!("\nAbout:");
    println!("{:-<60}", "");
    for (label, section) in [
        ("Brief", &page.about_content),
        ("Mission", &page.mission),
        ("Vision", &page.vision),
    ] {
        if let Some(section) = section {
            println!("{}: {}", label, section.content.as_deref().unwrap_or(""));
        }
    }
    if !page.values.is_empty() {
        println!("Values:");
        for value in &page.values {
            println!("  - {}", value.title);
        }
    }
    if !page.awards.is_empty() {
        println!("Awards:");
        for award in &page.awards {
            match award.year {
                Some(year) => println!("  - {} ({})", award.title, year),
                None => println!("  - {}", award.title),
            }
        }
    }
    Ok(())
}

pub async fn board() -> Result<()> {
    let client = super::client()?;
    let page = client.public_board().await?;

    println!("\nBoard of directors:");
    println!("{:-<60}", "");
    for (label, members) in [
        ("Executive", &page.executive),
        ("Board", &page.board),
        ("Supervisory", &page.supervisory),
    ] {
        if members.is_empty() {
            continue;
        }
        println!("{}:", label);
        for member in members {
            println!(
                "  {} -- {}",
                member.full_name,
                member.position.as_deref().unwrap_or("(no position)")
            );
        }
    }
    Ok(())
}

pub async fn departments() -> Result<()> {
    let client = super::client()?;
    let departments = client.public_departments().await?;

    println!("\nDepartments:");
    println!("{:-<60}", "");
    for dept in &departments {
        println!(
            "  {} ({})",
            dept.name,
            dept.slug.as_deref().unwrap_or("no slug")
        );
    }
    Ok(())
}

pub async fn department(slug: String) -> Result<()> {
    let client = super::client()?;
    let detail = client.public_department(&slug).await?;

    println!("\n{}", detail.department.name);
    println!("{:-<60}", "");
    if let Some(desc) = &detail.department.description {
        println!("{}", desc);
    }
    if !detail.staff.is_empty() {
        println!("Staff:");
        for member in &detail.staff {
            println!(
                "  {} -- {}",
                member.full_name,
                member.position.as_deref().unwrap_or("(no position)")
            );
        }
    }
    Ok(())
}

pub async fn products(category: Option<String>) -> Result<()> {
    let client = super::client()?;
    let page = client.public_products(category.as_deref()).await?;

    println!("\nProducts:");
    println!("{:-<60}", "");
    for product in &page.products {
        println!("[{}] {}", product.id, product.name);
        if let Some(rate) = &product.interest_rate {
            println!("  rate: {}", rate);
        }
    }
    if !page.categories.is_empty() {
        println!("Categories:");
        for category in &page.categories {
            println!(
                "  {} ({})",
                category.name,
                category.slug.as_deref().unwrap_or("no slug")
            );
        }
    }
    Ok(())
}

pub async fn downloads(category: Option<String>, search: Option<String>) -> Result<()> {
    let client = super::client()?;
    let page = client
        .public_downloads(category.as_deref(), search.as_deref())
        .await?;

    println!("\nDownloads:");
    println!("{:-<60}", "");
    for form in &page.forms {
        println!(
            "[{}] {} ({})",
            form.id,
            form.title,
            form.file_type.as_deref().unwrap_or("?")
        );
    }
    Ok(())
}

pub async fn news(id: Option<i64>) -> Result<()> {
    let client = super::client()?;
    match id {
        Some(id) => {
            let article = client.public_news_item(id).await?;
            println!("\n{}", article.title);
            println!("{:-<60}", "");
            println!(
                "{} | {}",
                article.author.as_deref().unwrap_or("unknown author"),
                article.publish_date.as_deref().unwrap_or("unpublished")
            );
            if let Some(content) = &article.content {
                println!("\n{}", content);
            }
        }
        None => {
            let articles = client.public_news().await?;
            println!("\nNews:");
            println!("{:-<60}", "");
            for article in &articles {
                println!("[{}] {}", article.id, article.title);
            }
        }
    }
    Ok(())
}
