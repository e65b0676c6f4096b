//! Session storage
//!
//! The client reads and writes tokens through the [`SessionStore`] trait so
//! the renewal logic is testable without touching the on-disk config file.

use std::sync::Mutex;

use crate::models::AdminUser;

/// Storage for the bearer-token session: access token, refresh token and the
/// cached admin identity. All three are cleared together on logout or
/// terminal auth failure.
pub trait SessionStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn set_access_token(&self, token: &str);
    fn refresh_token(&self) -> Option<String>;
    fn set_refresh_token(&self, token: &str);
    fn cached_user(&self) -> Option<AdminUser>;
    fn set_cached_user(&self, user: &AdminUser);
    fn clear(&self);
}

#[derive(Default)]
struct Session {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<AdminUser>,
}

/// In-memory session store, for tests and library embedding.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Session>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with tokens.
    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let store = Self::new();
        store.set_access_token(access);
        store.set_refresh_token(refresh);
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemoryStore {
    fn access_token(&self) -> Option<String> {
        self.lock().access_token.clone()
    }

    fn set_access_token(&self, token: &str) {
        self.lock().access_token = Some(token.to_string());
    }

    fn refresh_token(&self) -> Option<String> {
        self.lock().refresh_token.clone()
    }

    fn set_refresh_token(&self, token: &str) {
        self.lock().refresh_token = Some(token.to_string());
    }

    fn cached_user(&self) -> Option<AdminUser> {
        self.lock().user.clone()
    }

    fn set_cached_user(&self, user: &AdminUser) {
        self.lock().user = Some(user.clone());
    }

    fn clear(&self) {
        let mut session = self.lock();
        session.access_token = None;
        session.refresh_token = None;
        session.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_round_trip() {
        let store = MemoryStore::new();
        assert!(store.access_token().is_none());

        store.set_access_token("A1");
        store.set_refresh_token("R1");
        assert_eq!(store.access_token().as_deref(), Some("A1"));
        assert_eq!(store.refresh_token().as_deref(), Some("R1"));

        // Renewal replaces the access token wholesale, refresh stays.
        store.set_access_token("A2");
        assert_eq!(store.access_token().as_deref(), Some("A2"));
        assert_eq!(store.refresh_token().as_deref(), Some("R1"));
    }

    #[test]
    fn test_clear_empties_everything() {
        let store = MemoryStore::with_tokens("A1", "R1");
        store.clear();
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
        assert!(store.cached_user().is_none());
    }
}
