//! Editorial content management (/admin): sliders, news, about sections,
//! core values and awards
//!
//! Sliders, news, about sections and awards carry an image and go over
//! multipart; values are plain JSON.

use std::path::PathBuf;

use anyhow::Result;
use serde_json::{json, Map, Value};

use super::client::{FormBody, SaccoClient};
use super::error::ApiError;
use super::Ack;
use crate::models::{AboutSection, Award, CoreValue, NewsArticle, Slider};

// -- Typed endpoint methods --

impl SaccoClient {
    pub async fn list_sliders(&self) -> Result<Vec<Slider>, ApiError> {
        self.get("/admin/sliders").await
    }

    pub async fn create_slider(&self, form: FormBody) -> Result<Slider, ApiError> {
        self.post_form("/admin/sliders", form).await
    }

    pub async fn update_slider(&self, id: i64, form: FormBody) -> Result<Slider, ApiError> {
        self.put_form(&format!("/admin/sliders/{id}"), form).await
    }

    pub async fn delete_slider(&self, id: i64) -> Result<Ack, ApiError> {
        self.delete(&format!("/admin/sliders/{id}")).await
    }

    pub async fn list_news(&self) -> Result<Vec<NewsArticle>, ApiError> {
        self.get("/admin/news").await
    }

    pub async fn create_news(&self, form: FormBody) -> Result<NewsArticle, ApiError> {
        self.post_form("/admin/news", form).await
    }

    pub async fn update_news(&self, id: i64, form: FormBody) -> Result<NewsArticle, ApiError> {
        self.put_form(&format!("/admin/news/{id}"), form).await
    }

    pub async fn delete_news(&self, id: i64) -> Result<Ack, ApiError> {
        self.delete(&format!("/admin/news/{id}")).await
    }

    pub async fn about_sections(&self) -> Result<Vec<AboutSection>, ApiError> {
        self.get("/admin/about").await
    }

    /// Upsert keyed by `section_key`; the backend creates missing sections.
    pub async fn update_about_section(
        &self,
        section_key: &str,
        form: FormBody,
    ) -> Result<AboutSection, ApiError> {
        self.put_form(&format!("/admin/about/{section_key}"), form)
            .await
    }

    pub async fn list_values(&self) -> Result<Vec<CoreValue>, ApiError> {
        self.get("/admin/values").await
    }

    pub async fn create_value(&self, body: Value) -> Result<CoreValue, ApiError> {
        self.post("/admin/values", body).await
    }

    pub async fn update_value(&self, id: i64, body: Value) -> Result<CoreValue, ApiError> {
        self.put(&format!("/admin/values/{id}"), body).await
    }

    pub async fn delete_value(&self, id: i64) -> Result<Ack, ApiError> {
        self.delete(&format!("/admin/values/{id}")).await
    }

    pub async fn list_awards(&self) -> Result<Vec<Award>, ApiError> {
        self.get("/admin/awards").await
    }

    pub async fn create_award(&self, form: FormBody) -> Result<Award, ApiError> {
        self.post_form("/admin/awards", form).await
    }

    pub async fn update_award(&self, id: i64, form: FormBody) -> Result<Award, ApiError> {
        self.put_form(&format!("/admin/awards/{id}"), form).await
    }

    pub async fn delete_award(&self, id: i64) -> Result<Ack, ApiError> {
        self.delete(&format!("/admin/awards/{id}")).await
    }
}

// -- CLI commands --

/// Slider create/update fields. Omitted fields keep their current value.
#[derive(Debug, clap::Args)]
pub struct SliderFields {
    /// Image file to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub subtitle: Option<String>,
    #[arg(long)]
    pub link_url: Option<String>,
    #[arg(long)]
    pub display_order: Option<i64>,
    #[arg(long)]
    pub active: Option<bool>,
}

fn slider_form(fields: &SliderFields) -> Result<FormBody> {
    let form = FormBody::new()
        .maybe_field("title", fields.title.as_ref())
        .maybe_field("subtitle", fields.subtitle.as_ref())
        .maybe_field("link_url", fields.link_url.as_ref())
        .maybe_field("display_order", fields.display_order)
        .maybe_field("is_active", fields.active);
    super::attach_file(form, "image", fields.image.as_deref())
}

pub async fn list_sliders() -> Result<()> {
    let client = super::client()?;
    let sliders = client.list_sliders().await?;

    println!("\nSliders:");
    println!("{:-<60}", "");
    if sliders.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for slider in &sliders {
        let state = if slider.is_active { "active" } else { "inactive" };
        println!(
            "[{}] {} ({}, order {})",
            slider.id,
            slider.title.as_deref().unwrap_or("(untitled)"),
            state,
            slider.display_order
        );
        println!("  image: {}", slider.image_url);
        if let Some(link) = &slider.link_url {
            println!("  link:  {}", link);
        }
    }
    Ok(())
}

pub async fn create_slider(fields: SliderFields) -> Result<()> {
    let client = super::client()?;
    let slider = client.create_slider(slider_form(&fields)?).await?;
    println!(
        "Created slider {} ({})",
        slider.id,
        slider.title.as_deref().unwrap_or("untitled")
    );
    Ok(())
}

pub async fn update_slider(id: i64, fields: SliderFields) -> Result<()> {
    let client = super::client()?;
    let slider = client.update_slider(id, slider_form(&fields)?).await?;
    println!("Updated slider {}", slider.id);
    Ok(())
}

pub async fn delete_slider(id: i64) -> Result<()> {
    let client = super::client()?;
    client.delete_slider(id).await?;
    println!("Deleted slider {}", id);
    Ok(())
}

/// News create/update fields.
#[derive(Debug, clap::Args)]
pub struct NewsFields {
    /// Featured image file to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub excerpt: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    /// Publish date as YYYY-MM-DD
    #[arg(long)]
    pub publish_date: Option<String>,
    #[arg(long)]
    pub featured: Option<bool>,
}

fn news_form(fields: &NewsFields) -> Result<FormBody> {
    let form = FormBody::new()
        .maybe_field("title", fields.title.as_ref())
        .maybe_field("category", fields.category.as_ref())
        .maybe_field("excerpt", fields.excerpt.as_ref())
        .maybe_field("content", fields.content.as_ref())
        .maybe_field("author", fields.author.as_ref())
        .maybe_field("publish_date", fields.publish_date.as_ref())
        .maybe_field("is_featured", fields.featured);
    super::attach_file(form, "featured_image", fields.image.as_deref())
}

pub async fn list_news() -> Result<()> {
    let client = super::client()?;
    let articles = client.list_news().await?;

    println!("\nNews:");
    println!("{:-<60}", "");
    if articles.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for article in &articles {
        let mark = if article.is_featured { " *" } else { "" };
        println!("[{}] {}{}", article.id, article.title, mark);
        println!(
            "  {} | {} | {}",
            article.category.as_deref().unwrap_or("uncategorized"),
            article.author.as_deref().unwrap_or("unknown author"),
            article.publish_date.as_deref().unwrap_or("unpublished")
        );
    }
    Ok(())
}

pub async fn create_news(fields: NewsFields) -> Result<()> {
    let client = super::client()?;
    let article = client.create_news(news_form(&fields)?).await?;
    println!("Created news article {} ({})", article.id, article.title);
    Ok(())
}

pub async fn update_news(id: i64, fields: NewsFields) -> Result<()> {
    let client = super::client()?;
    let article = client.update_news(id, news_form(&fields)?).await?;
    println!("Updated news article {}", article.id);
    Ok(())
}

pub async fn delete_news(id: i64) -> Result<()> {
    let client = super::client()?;
    client.delete_news(id).await?;
    println!("Deleted news article {}", id);
    Ok(())
}

/// About-section update fields.
#[derive(Debug, clap::Args)]
pub struct AboutFields {
    /// Section image file to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub video_url: Option<String>,
    #[arg(long)]
    pub display_order: Option<i64>,
}

pub async fn show_about() -> Result<()> {
    let client = super::client()?;
    let sections = client.about_sections().await?;

    println!("\nAbout sections:");
    println!("{:-<60}", "");
    if sections.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for section in &sections {
        println!(
            "[{}] {} -- {}",
            section.id,
            section.section_key,
            section.title.as_deref().unwrap_or("(untitled)")
        );
        if let Some(content) = &section.content {
            println!("  {}", content);
        }
    }
    Ok(())
}

pub async fn update_about(section_key: String, fields: AboutFields) -> Result<()> {
    let form = FormBody::new()
        .maybe_field("title", fields.title.as_ref())
        .maybe_field("content", fields.content.as_ref())
        .maybe_field("video_url", fields.video_url.as_ref())
        .maybe_field("display_order", fields.display_order);
    let form = super::attach_file(form, "image", fields.image.as_deref())?;

    let client = super::client()?;
    let section = client.update_about_section(&section_key, form).await?;
    println!("Updated about section '{}'", section.section_key);
    Ok(())
}

/// Core value create/update fields (JSON endpoint).
#[derive(Debug, clap::Args)]
pub struct ValueFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub icon_class: Option<String>,
    #[arg(long)]
    pub display_order: Option<i64>,
}

fn value_body(fields: &ValueFields) -> Value {
    let mut body = Map::new();
    if let Some(v) = &fields.title {
        body.insert("title".into(), json!(v));
    }
    if let Some(v) = &fields.description {
        body.insert("description".into(), json!(v));
    }
    if let Some(v) = &fields.icon_class {
        body.insert("icon_class".into(), json!(v));
    }
    if let Some(v) = fields.display_order {
        body.insert("display_order".into(), json!(v));
    }
    Value::Object(body)
}

pub async fn list_values() -> Result<()> {
    let client = super::client()?;
    let values = client.list_values().await?;

    println!("\nCore values:");
    println!("{:-<60}", "");
    if values.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for value in &values {
        println!("[{}] {}", value.id, value.title);
        if let Some(desc) = &value.description {
            println!("  {}", desc);
        }
    }
    Ok(())
}

pub async fn create_value(fields: ValueFields) -> Result<()> {
    let client = super::client()?;
    let value = client.create_value(value_body(&fields)).await?;
    println!("Created core value {} ({})", value.id, value.title);
    Ok(())
}

pub async fn update_value(id: i64, fields: ValueFields) -> Result<()> {
    let client = super::client()?;
    let value = client.update_value(id, value_body(&fields)).await?;
    println!("Updated core value {}", value.id);
    Ok(())
}

pub async fn delete_value(id: i64) -> Result<()> {
    let client = super::client()?;
    client.delete_value(id).await?;
    println!("Deleted core value {}", id);
    Ok(())
}

/// Award create/update fields.
#[derive(Debug, clap::Args)]
pub struct AwardFields {
    /// Icon image file to upload
    #[arg(long)]
    pub icon: Option<PathBuf>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub year: Option<i64>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub display_order: Option<i64>,
}

fn award_form(fields: &AwardFields) -> Result<FormBody> {
    let form = FormBody::new()
        .maybe_field("title", fields.title.as_ref())
        .maybe_field("year", fields.year)
        .maybe_field("description", fields.description.as_ref())
        .maybe_field("display_order", fields.display_order);
    super::attach_file(form, "icon", fields.icon.as_deref())
}

pub async fn list_awards() -> Result<()> {
    let client = super::client()?;
    let awards = client.list_awards().await?;

    println!("\nAwards:");
    println!("{:-<60}", "");
    if awards.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for award in &awards {
        match award.year {
            Some(year) => println!("[{}] {} ({})", award.id, award.title, year),
            None => println!("[{}] {}", award.id, award.title),
        }
    }
    Ok(())
}

pub async fn create_award(fields: AwardFields) -> Result<()> {
    let client = super::client()?;
    let award = client.create_award(award_form(&fields)?).await?;
    println!("Created award {} ({})", award.id, award.title);
    Ok(())
}

pub async fn update_award(id: i64, fields: AwardFields) -> Result<()> {
    let client = super::client()?;
    let award = client.update_award(id, award_form(&fields)?).await?;
    println!("Updated award {}", award.id);
    Ok(())
}

pub async fn delete_award(id: i64) -> Result<()> {
    let client = super::client()?;
    client.delete_award(id).await?;
    println!("Deleted award {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_body_skips_missing_fields() {
        let fields = ValueFields {
            title: Some("Integrity".to_string()),
            description: None,
            icon_class: None,
            display_order: Some(2),
        };
        let body = value_body(&fields);
        assert_eq!(body, json!({"title": "Integrity", "display_order": 2}));
    }
}
