//! Configuration and session persistence

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::auth::SessionStore;
use crate::models::AdminUser;

/// Backend endpoint used when neither the environment nor the config file
/// provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Environment variable consulted first for the backend endpoint.
pub const BASE_URL_ENV: &str = "SACCO_API_URL";

/// Application configuration and persisted session state.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL override (the SACCO_API_URL env var wins over this)
    pub base_url: Option<String>,
    /// Bearer access token from the last login or renewal
    pub access_token: Option<String>,
    /// Refresh token, presented only to /auth/refresh
    pub refresh_token: Option<String>,
    /// Cached admin user from the last login (JSON stored as string for TOML compat)
    pub user: Option<String>,
}

impl Config {
    /// Get config directory path
    fn config_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "chuna-sacco", "sacco-cli")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }

    /// Get config file path
    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        Self::load_path(&Self::config_path()?)
    }

    fn load_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir).context("Failed to create config directory")?;
        self.save_path(&Self::config_path()?)
    }

    fn save_path(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;

        // Set restrictive permissions on config file (contains tokens)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, perms).context("Failed to set config permissions")?;
        }

        Ok(())
    }

    pub fn get_user(&self) -> Option<AdminUser> {
        self.user
            .as_deref()
            .and_then(|s| serde_json::from_str(s).ok())
    }

    pub fn set_user(&mut self, user: &AdminUser) {
        self.user = serde_json::to_string(user).ok();
    }

    /// Drop all session state: both tokens and the cached user.
    pub fn clear_session(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.user = None;
    }
}

/// Resolve the backend base URL: environment, then config file, then the
/// local default.
pub fn resolve_base_url(config: &Config) -> String {
    pick_base_url(std::env::var(BASE_URL_ENV).ok(), config)
}

fn pick_base_url(env: Option<String>, config: &Config) -> String {
    env.filter(|v| !v.is_empty())
        .or_else(|| config.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Session store backed by the on-disk config file. Every access reloads the
/// file so concurrent invocations see each other's writes; the mutex
/// serializes load-mutate-save cycles within this process. Persistence
/// failures are logged, not propagated -- token state also lives in the
/// running client and the next command will retry the write.
#[derive(Default)]
pub struct FileStore {
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Config {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Config::load().unwrap_or_else(|e| {
            tracing::warn!("failed to load config: {:#}", e);
            Config::default()
        })
    }

    fn update(&self, apply: impl FnOnce(&mut Config)) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut config = Config::load().unwrap_or_else(|e| {
            tracing::warn!("failed to load config: {:#}", e);
            Config::default()
        });
        apply(&mut config);
        if let Err(e) = config.save() {
            tracing::warn!("failed to persist session: {:#}", e);
        }
    }
}

impl SessionStore for FileStore {
    fn access_token(&self) -> Option<String> {
        self.read().access_token
    }

    fn set_access_token(&self, token: &str) {
        self.update(|c| c.access_token = Some(token.to_string()));
    }

    fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token
    }

    fn set_refresh_token(&self, token: &str) {
        self.update(|c| c.refresh_token = Some(token.to_string()));
    }

    fn cached_user(&self) -> Option<AdminUser> {
        self.read().get_user()
    }

    fn set_cached_user(&self, user: &AdminUser) {
        self.update(|c| c.set_user(user));
    }

    fn clear(&self) {
        self.update(Config::clear_session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config {
            base_url: Some("http://example.test/api".to_string()),
            access_token: Some("A1".to_string()),
            refresh_token: Some("R1".to_string()),
            user: None,
        };
        config.set_user(&AdminUser {
            id: 1,
            username: "admin".to_string(),
            email: "admin@example.test".to_string(),
            full_name: Some("Site Admin".to_string()),
            role: Some("admin".to_string()),
            last_login: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        });
        config.save_path(&path).unwrap();

        let loaded = Config::load_path(&path).unwrap();
        assert_eq!(loaded.access_token.as_deref(), Some("A1"));
        assert_eq!(loaded.refresh_token.as_deref(), Some("R1"));
        assert_eq!(loaded.get_user().unwrap().username, "admin");
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_path(&dir.path().join("nope.toml")).unwrap();
        assert!(config.access_token.is_none());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_base_url_precedence() {
        let config = Config {
            base_url: Some("http://from-config/api".to_string()),
            ..Config::default()
        };

        // Env wins over config, config over default, default last.
        assert_eq!(
            pick_base_url(Some("http://from-env/api".to_string()), &config),
            "http://from-env/api"
        );
        assert_eq!(pick_base_url(None, &config), "http://from-config/api");
        assert_eq!(
            pick_base_url(Some(String::new()), &Config::default()),
            DEFAULT_BASE_URL
        );
    }

    #[test]
    fn test_clear_session_keeps_base_url() {
        let mut config = Config {
            base_url: Some("http://example.test/api".to_string()),
            access_token: Some("A1".to_string()),
            refresh_token: Some("R1".to_string()),
            user: Some("{}".to_string()),
        };
        config.clear_session();
        assert!(config.access_token.is_none());
        assert!(config.refresh_token.is_none());
        assert!(config.user.is_none());
        assert!(config.base_url.is_some());
    }
}
