//! Authenticated HTTP client for the SACCO backend
//!
//! Wraps reqwest::Client with bearer-token injection and one transparent
//! token renewal when a request comes back 401. Renewal is single-flight:
//! concurrent 401s coalesce on one /auth/refresh call instead of racing.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::error::ApiError;
use crate::auth::SessionStore;

/// Notified when the session cannot be recovered and has been cleared. The
/// CLI prints a re-login notice; the web client this mirrors redirected to
/// its login page.
pub trait SessionExpiredHandler: Send + Sync {
    fn session_expired(&self);
}

/// Handler that stays quiet, for flows that report auth failures themselves.
pub struct SilentExpiry;

impl SessionExpiredHandler for SilentExpiry {
    fn session_expired(&self) {}
}

/// One file part of a multipart submission, held as owned bytes so the
/// request can be rebuilt for the post-renewal retry.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub name: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Multipart form body: plain string fields plus file parts.
#[derive(Debug, Clone, Default)]
pub struct FormBody {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl FormBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    /// Add the field only when a value was given; absent fields keep their
    /// server-side value on update. Form values are strings on the wire, so
    /// numbers and booleans go through Display.
    pub fn maybe_field(self, name: &str, value: Option<impl std::fmt::Display>) -> Self {
        match value {
            Some(v) => self.field(name, v.to_string()),
            None => self,
        }
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: Vec<u8>) -> Self {
        self.files.push(FilePart {
            name: name.to_string(),
            file_name: file_name.to_string(),
            bytes,
        });
        self
    }

    fn to_form(&self) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }
        for part in &self.files {
            form = form.part(
                part.name.clone(),
                reqwest::multipart::Part::bytes(part.bytes.clone())
                    .file_name(part.file_name.clone()),
            );
        }
        form
    }
}

/// Request body, kept as a rebuildable value rather than a one-shot
/// reqwest body so the retried attempt can reconstruct it.
enum Body {
    Empty,
    Json(serde_json::Value),
    Form(FormBody),
}

#[derive(Deserialize)]
struct RenewalResponse {
    access_token: String,
}

/// Authenticated client for the SACCO REST API.
pub struct SaccoClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    expiry: Arc<dyn SessionExpiredHandler>,
    renewal: Mutex<()>,
}

impl SaccoClient {
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<dyn SessionStore>,
        expiry: Arc<dyn SessionExpiredHandler>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            expiry,
            renewal: Mutex::new(()),
        }
    }

    /// The session store this client reads tokens from and persists
    /// renewals to.
    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Method::GET, path, &[], &Body::Empty).await
    }

    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, query, &Body::Empty).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ApiError> {
        self.execute(Method::POST, path, &[], &Body::Json(body)).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ApiError> {
        self.execute(Method::PUT, path, &[], &Body::Json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Method::DELETE, path, &[], &Body::Empty).await
    }

    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: FormBody,
    ) -> Result<T, ApiError> {
        self.execute(Method::POST, path, &[], &Body::Form(form)).await
    }

    pub async fn put_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: FormBody,
    ) -> Result<T, ApiError> {
        self.execute(Method::PUT, path, &[], &Body::Form(form)).await
    }

    /// Send the request, attaching the stored access token; on a first 401
    /// renew the token once and re-issue the request, returning the retried
    /// outcome to the caller. A request is never re-issued more than once.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: &Body,
    ) -> Result<T, ApiError> {
        let token = self.store.access_token();
        tracing::debug!("{} {}{}", method, self.base_url, path);

        let resp = self
            .send(method.clone(), path, query, body, token.as_deref())
            .await?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return Self::decode(Self::check(resp).await?).await;
        }

        // First 401 for this request: renew once and retry with the fresh
        // token. Renewal failure is terminal for the session.
        let fresh = match self.renew(token.as_deref()).await {
            Some(fresh) => fresh,
            None => {
                self.expire();
                return Err(ApiError::SessionExpired);
            }
        };

        tracing::debug!("retrying {} {} with renewed token", method, path);
        let resp = self.send(method, path, query, body, Some(&fresh)).await?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            // Renewed token rejected as well; do not renew a second time.
            self.expire();
            return Err(ApiError::SessionExpired);
        }
        Self::decode(Self::check(resp).await?).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: &Body,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, &url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        req = match body {
            Body::Empty => req,
            Body::Json(value) => req.json(value),
            Body::Form(form) => req.multipart(form.to_form()),
        };
        Ok(req.send().await?)
    }

    /// Exchange the refresh token for a new access token. `stale` is the
    /// access token that just failed; if another task already replaced it
    /// while we waited for the renewal lock, that token is reused instead of
    /// issuing a redundant renewal call. Returns None when renewal failed.
    async fn renew(&self, stale: Option<&str>) -> Option<String> {
        let _guard = self.renewal.lock().await;

        let current = self.store.access_token();
        if current.as_deref() != stale {
            return current;
        }

        let refresh = self.store.refresh_token()?;
        tracing::info!("access token rejected, renewing");

        let url = format!("{}/auth/refresh", self.base_url);
        let resp = match self.http.post(&url).bearer_auth(&refresh).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("token renewal request failed: {:#}", e);
                return None;
            }
        };
        if !resp.status().is_success() {
            tracing::warn!("token renewal rejected: HTTP {}", resp.status().as_u16());
            return None;
        }
        let renewed: RenewalResponse = match resp.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("malformed renewal response: {:#}", e);
                return None;
            }
        };

        // Refresh token is not rotated by the backend; only the access
        // token is replaced.
        self.store.set_access_token(&renewed.access_token);
        Some(renewed.access_token)
    }

    /// Terminal auth failure: drop the whole session and notify the host.
    fn expire(&self) {
        self.store.clear();
        self.expiry.session_expired();
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::from_response(status, body))
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryStore;
    use crate::models::Slider;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use wiremock::matchers::{bearer_token, body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct ExpiryProbe {
        fired: AtomicUsize,
    }

    impl SessionExpiredHandler for ExpiryProbe {
        fn session_expired(&self) {
            self.fired.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn client_for(
        server: &MockServer,
        store: Arc<MemoryStore>,
        probe: Arc<ExpiryProbe>,
    ) -> SaccoClient {
        SaccoClient::new(server.uri(), store, probe)
    }

    fn slider_json(id: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "image_url": "/static/uploads/slider/a.jpg",
            "title": "Welcome",
            "subtitle": null,
            "link_url": null,
            "display_order": 0,
            "is_active": true,
            "created_at": null,
            "updated_at": null
        })
    }

    #[tokio::test]
    async fn test_bearer_header_matches_stored_token() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::with_tokens("A1", "R1"));
        let client = client_for(&server, store, Arc::new(ExpiryProbe::default()));

        Mock::given(method("GET"))
            .and(path("/admin/sliders"))
            .and(bearer_token("A1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let sliders: Vec<Slider> = client.get("/admin/sliders").await.unwrap();
        assert!(sliders.is_empty());
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        let client = client_for(&server, store, Arc::new(ExpiryProbe::default()));

        Mock::given(method("GET"))
            .and(path("/public/news"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let _: Vec<serde_json::Value> = client.get("/public/news").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_renewal_then_retry_succeeds() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::with_tokens("A1", "R1"));
        let probe = Arc::new(ExpiryProbe::default());
        let client = client_for(&server, store.clone(), probe.clone());

        Mock::given(method("GET"))
            .and(path("/admin/sliders"))
            .and(bearer_token("A1"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .and(bearer_token("R1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"access_token": "A2"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/sliders"))
            .and(bearer_token("A2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([slider_json(1)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let sliders: Vec<Slider> = client.get("/admin/sliders").await.unwrap();
        assert_eq!(sliders.len(), 1);
        assert_eq!(sliders[0].id, 1);

        // New access token persisted, refresh token untouched, no expiry.
        assert_eq!(store.access_token().as_deref(), Some("A2"));
        assert_eq!(store.refresh_token().as_deref(), Some("R1"));
        assert_eq!(probe.fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_exhausted_renewal_clears_session() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::with_tokens("A1", "R1"));
        let probe = Arc::new(ExpiryProbe::default());
        let client = client_for(&server, store.clone(), probe.clone());

        Mock::given(method("GET"))
            .and(path("/admin/news"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let result: Result<Vec<serde_json::Value>, _> = client.get("/admin/news").await;
        assert!(matches!(result, Err(ApiError::SessionExpired)));
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
        assert_eq!(probe.fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_second_401_does_not_renew_again() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::with_tokens("A1", "R1"));
        let probe = Arc::new(ExpiryProbe::default());
        let client = client_for(&server, store.clone(), probe.clone());

        // Resource rejects both the old and the renewed token.
        Mock::given(method("GET"))
            .and(path("/admin/sliders"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"access_token": "A2"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result: Result<serde_json::Value, _> = client.get("/admin/sliders").await;
        assert!(matches!(result, Err(ApiError::SessionExpired)));
        assert!(store.access_token().is_none());
        assert_eq!(probe.fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_refresh_token_fails_without_network_call() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        store.set_access_token("A1");
        let probe = Arc::new(ExpiryProbe::default());
        let client = client_for(&server, store.clone(), probe.clone());

        Mock::given(method("GET"))
            .and(path("/admin/news"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let result: Result<serde_json::Value, _> = client.get("/admin/news").await;
        assert!(matches!(result, Err(ApiError::SessionExpired)));
        assert_eq!(probe.fired.load(Ordering::SeqCst), 1);

        // Only the original request went out; no /auth/refresh attempt.
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn test_non_401_error_propagates_without_retry() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::with_tokens("A1", "R1"));
        let probe = Arc::new(ExpiryProbe::default());
        let client = client_for(&server, store.clone(), probe.clone());

        Mock::given(method("GET"))
            .and(path("/admin/products"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"message": "Failed to fetch products"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result: Result<serde_json::Value, _> = client.get("/admin/products").await;
        match result {
            Err(ApiError::Http { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to fetch products");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        // Token state is untouched by non-401 failures.
        assert_eq!(store.access_token().as_deref(), Some("A1"));
        assert_eq!(probe.fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_repeated_success_leaves_tokens_alone() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::with_tokens("A1", "R1"));
        let client = client_for(&server, store.clone(), Arc::new(ExpiryProbe::default()));

        Mock::given(method("GET"))
            .and(path("/admin/values"))
            .and(bearer_token("A1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(2)
            .mount(&server)
            .await;

        let _: Vec<serde_json::Value> = client.get("/admin/values").await.unwrap();
        let _: Vec<serde_json::Value> = client.get("/admin/values").await.unwrap();
        assert_eq!(store.access_token().as_deref(), Some("A1"));
        assert_eq!(store.refresh_token().as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn test_concurrent_401s_renew_once() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::with_tokens("A1", "R1"));
        let client = Arc::new(client_for(
            &server,
            store.clone(),
            Arc::new(ExpiryProbe::default()),
        ));

        Mock::given(method("GET"))
            .and(path("/admin/staff"))
            .and(bearer_token("A1"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        // Delay widens the window in which both tasks hold a stale token.
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .and(bearer_token("R1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"access_token": "A2"}))
                    .set_delay(Duration::from_millis(50)),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/staff"))
            .and(bearer_token("A2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let a = client.clone();
        let b = client.clone();
        let (ra, rb) = tokio::join!(
            async move { a.get::<Vec<serde_json::Value>>("/admin/staff").await },
            async move { b.get::<Vec<serde_json::Value>>("/admin/staff").await },
        );
        assert!(ra.is_ok());
        assert!(rb.is_ok());
        assert_eq!(store.access_token().as_deref(), Some("A2"));
    }

    #[tokio::test]
    async fn test_multipart_body_rebuilt_for_retry() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::with_tokens("A1", "R1"));
        let client = client_for(&server, store, Arc::new(ExpiryProbe::default()));

        Mock::given(method("POST"))
            .and(path("/admin/sliders"))
            .and(bearer_token("A1"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"access_token": "A2"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/admin/sliders"))
            .and(bearer_token("A2"))
            .respond_with(ResponseTemplate::new(201).set_body_json(slider_json(7)))
            .expect(1)
            .mount(&server)
            .await;

        let form = FormBody::new()
            .field("title", "Welcome")
            .file("image", "hero.jpg", vec![0xFF, 0xD8, 0xFF]);
        let created: Slider = client.post_form("/admin/sliders", form).await.unwrap();
        assert_eq!(created.id, 7);
    }

    #[tokio::test]
    async fn test_json_body_sent_as_given() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::with_tokens("A1", "R1"));
        let client = client_for(&server, store, Arc::new(ExpiryProbe::default()));

        let body = serde_json::json!({"title": "Integrity", "display_order": 2});
        Mock::given(method("POST"))
            .and(path("/admin/values"))
            .and(body_json(body.clone()))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 4, "title": "Integrity", "description": null,
                "icon_class": null, "display_order": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let value: crate::models::CoreValue = client.post("/admin/values", body).await.unwrap();
        assert_eq!(value.id, 4);
        assert_eq!(value.display_order, 2);
    }
}
