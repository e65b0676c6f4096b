//! Authentication endpoints (/auth)

use serde::Deserialize;
use serde_json::json;

use super::client::SaccoClient;
use super::error::ApiError;
use super::Ack;
use crate::models::AdminUser;

/// Successful /auth/login body: both tokens plus the signed-in user.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AdminUser,
}

impl SaccoClient {
    /// Sign in and persist the resulting session to this client's store.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let resp: LoginResponse = self
            .post(
                "/auth/login",
                json!({"username": username, "password": password}),
            )
            .await?;
        self.store().set_access_token(&resp.access_token);
        self.store().set_refresh_token(&resp.refresh_token);
        self.store().set_cached_user(&resp.user);
        Ok(resp)
    }

    /// Tell the backend the session is over. Local state is the caller's to
    /// clear; the server keeps no session object.
    pub async fn logout(&self) -> Result<Ack, ApiError> {
        self.post("/auth/logout", json!({})).await
    }

    /// Fetch the currently signed-in admin user.
    pub async fn me(&self) -> Result<AdminUser, ApiError> {
        self.get("/auth/me").await
    }

    pub async fn change_password(&self, old: &str, new: &str) -> Result<Ack, ApiError> {
        self.post(
            "/auth/change-password",
            json!({"old_password": old, "new_password": new}),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::SilentExpiry;
    use crate::auth::{MemoryStore, SessionStore};
    use std::sync::Arc;
    use wiremock::matchers::{bearer_token, body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_login_persists_session_and_authenticates_next_call() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        let client = SaccoClient::new(server.uri(), store.clone(), Arc::new(SilentExpiry));

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(
                serde_json::json!({"username": "admin", "password": "password123"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Login successful",
                "access_token": "A1",
                "refresh_token": "R1",
                "user": {
                    "id": 1,
                    "username": "admin",
                    "email": "admin@example.test",
                    "full_name": "Site Admin",
                    "role": "admin",
                    "last_login": null,
                    "is_active": true,
                    "created_at": null,
                    "updated_at": null
                }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/dashboard/stats"))
            .and(bearer_token("A1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "stats": {
                    "total_products": 0, "total_staff": 0, "total_board_members": 0,
                    "total_departments": 0, "total_downloads": 0, "total_news": 0,
                    "total_sliders": 0
                },
                "recent_news": [],
                "recent_downloads": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = client.login("admin", "password123").await.unwrap();
        assert_eq!(resp.user.username, "admin");
        assert_eq!(store.access_token().as_deref(), Some("A1"));
        assert_eq!(store.refresh_token().as_deref(), Some("R1"));
        assert_eq!(store.cached_user().unwrap().id, 1);

        let report = client.dashboard().await.unwrap();
        assert_eq!(report.stats.total_products, 0);
    }

    #[tokio::test]
    async fn test_rejected_login_with_empty_store_is_terminal() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        let client = SaccoClient::new(server.uri(), store, Arc::new(SilentExpiry));

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"message": "Invalid username or password"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        // No refresh token stored, so renewal fails without a network call
        // and the rejection surfaces as a session-level failure.
        let result = client.login("admin", "wrong").await;
        assert!(matches!(result, Err(ApiError::SessionExpired)));
    }
}
