//! Back-office dashboard statistics (/admin/dashboard)

use anyhow::Result;
use serde::Deserialize;

use super::client::SaccoClient;
use super::error::ApiError;
use crate::models::{DownloadableForm, NewsArticle};

#[derive(Debug, Deserialize)]
pub struct DashboardReport {
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_news: Vec<NewsArticle>,
    #[serde(default)]
    pub recent_downloads: Vec<DownloadableForm>,
}

/// Entity counts shown on the admin landing page.
#[derive(Debug, Deserialize)]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_staff: i64,
    pub total_board_members: i64,
    pub total_departments: i64,
    pub total_downloads: i64,
    pub total_news: i64,
    pub total_sliders: i64,
}

impl SaccoClient {
    pub async fn dashboard(&self) -> Result<DashboardReport, ApiError> {
        self.get("/admin/dashboard/stats").await
    }
}

/// Fetch and display dashboard statistics.
pub async fn show() -> Result<()> {
    let client = super::client()?;
    let report = client.dashboard().await?;
    let stats = &report.stats;

    println!("\nDashboard");
    println!("{:-<60}", "");
    println!("Products:      {}", stats.total_products);
    println!("Staff:         {}", stats.total_staff);
    println!("Board members: {}", stats.total_board_members);
    println!("Departments:   {}", stats.total_departments);
    println!("Forms:         {}", stats.total_downloads);
    println!("News:          {}", stats.total_news);
    println!("Sliders:       {}", stats.total_sliders);

    if !report.recent_news.is_empty() {
        println!("\nRecent news:");
        for article in &report.recent_news {
            println!(
                "  [{}] {} ({})",
                article.id,
                article.title,
                article.publish_date.as_deref().unwrap_or("unpublished")
            );
        }
    }
    if !report.recent_downloads.is_empty() {
        println!("\nRecent uploads:");
        for form in &report.recent_downloads {
            println!(
                "  [{}] {} ({})",
                form.id,
                form.title,
                form.file_type.as_deref().unwrap_or("?")
            );
        }
    }

    Ok(())
}
