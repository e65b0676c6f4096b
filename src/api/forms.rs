//! Downloadable form management (/admin/forms)
//!
//! Uploads go over multipart with the document in the `file` part; size and
//! type are derived server-side.

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

use super::client::{FormBody, SaccoClient};
use super::error::ApiError;
use super::Ack;
use crate::models::DownloadableForm;

#[derive(Debug, Deserialize)]
pub struct TrackDownloadResponse {
    pub download_count: i64,
}

impl SaccoClient {
    pub async fn list_forms(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<DownloadableForm>, ApiError> {
        match category {
            Some(category) => {
                self.get_with("/admin/forms", &[("category", category.to_string())])
                    .await
            }
            None => self.get("/admin/forms").await,
        }
    }

    pub async fn upload_form(&self, form: FormBody) -> Result<DownloadableForm, ApiError> {
        self.post_form("/admin/forms", form).await
    }

    pub async fn update_form(&self, id: i64, form: FormBody) -> Result<DownloadableForm, ApiError> {
        self.put_form(&format!("/admin/forms/{id}"), form).await
    }

    pub async fn delete_form(&self, id: i64) -> Result<Ack, ApiError> {
        self.delete(&format!("/admin/forms/{id}")).await
    }

    /// Bump the download counter for a form.
    pub async fn track_download(&self, id: i64) -> Result<TrackDownloadResponse, ApiError> {
        self.post(
            &format!("/admin/forms/{id}/track-download"),
            serde_json::json!({}),
        )
        .await
    }
}

// -- CLI commands --

/// Form upload/update fields.
#[derive(Debug, clap::Args)]
pub struct FormFields {
    /// Document file to upload
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

fn form_body(fields: &FormFields) -> Result<FormBody> {
    let form = FormBody::new()
        .maybe_field("title", fields.title.as_ref())
        .maybe_field("category", fields.category.as_ref())
        .maybe_field("is_active", fields.active);
    super::attach_file(form, "file", fields.file.as_deref())
}

pub async fn list_forms(category: Option<String>) -> Result<()> {
    let client = super::client()?;
    let forms = client.list_forms(category.as_deref()).await?;

    println!("\nDownloadable forms:");
    println!("{:-<60}", "");
    if forms.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for form in &forms {
        println!(
            "[{}] {} ({}, {}, {} downloads)",
            form.id,
            form.title,
            form.file_type.as_deref().unwrap_or("?"),
            form.file_size.as_deref().unwrap_or("?"),
            form.download_count
        );
        println!("  {}", form.file_url);
    }
    Ok(())
}

pub async fn upload_form(fields: FormFields) -> Result<()> {
    let client = super::client()?;
    let form = client.upload_form(form_body(&fields)?).await?;
    println!("Uploaded form {} ({})", form.id, form.title);
    Ok(())
}

pub async fn update_form(id: i64, fields: FormFields) -> Result<()> {
    let client = super::client()?;
    let form = client.update_form(id, form_body(&fields)?).await?;
    println!("Updated form {}", form.id);
    Ok(())
}

pub async fn delete_form(id: i64) -> Result<()> {
    let client = super::client()?;
    client.delete_form(id).await?;
    println!("Deleted form {}", id);
    Ok(())
}

pub async fn track_download(id: i64) -> Result<()> {
    let client = super::client()?;
    let resp = client.track_download(id).await?;
    println!("Form {} download count: {}", id, resp.download_count);
    Ok(())
}
