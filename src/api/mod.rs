//! API client modules for the SACCO backend
//!
//! `client` holds the authenticated transport; the sibling modules add one
//! typed method per resource operation plus the CLI command functions that
//! print results.

pub mod auth;
pub mod client;
pub mod content;
pub mod dashboard;
pub mod directory;
pub mod error;
pub mod forms;
pub mod products;
pub mod public;

use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;

use crate::config::{self, Config, FileStore};
use client::{SaccoClient, SessionExpiredHandler};

/// Acknowledgement body returned by delete/logout-style endpoints.
#[derive(Debug, Deserialize)]
pub struct Ack {
    pub message: Option<String>,
}

/// Session-expired notice for interactive commands, the CLI analog of the
/// web client's hard redirect to its login page.
struct LoginNotice;

impl SessionExpiredHandler for LoginNotice {
    fn session_expired(&self) {
        eprintln!("Session expired. Run 'sacco-cli login' to sign in again.");
    }
}

/// Read an upload from disk and attach it as a multipart file part, keeping
/// the original file name. No-op when no path was given.
pub(crate) fn attach_file(
    form: client::FormBody,
    part: &str,
    path: Option<&std::path::Path>,
) -> Result<client::FormBody> {
    use anyhow::Context;

    match path {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            Ok(form.file(part, &file_name, bytes))
        }
        None => Ok(form),
    }
}

/// Build a client backed by the on-disk session.
pub fn client() -> Result<SaccoClient> {
    client_with(Arc::new(LoginNotice))
}

/// Build a client with a caller-provided session-expired handler.
pub fn client_with(expiry: Arc<dyn SessionExpiredHandler>) -> Result<SaccoClient> {
    let config = Config::load()?;
    let base_url = config::resolve_base_url(&config);
    Ok(SaccoClient::new(
        base_url,
        Arc::new(FileStore::new()),
        expiry,
    ))
}
