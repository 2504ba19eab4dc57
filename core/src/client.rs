//! Shared HTTP client for the campus API, with its request and response
//! interceptors.
//!
//! # Design
//! `ApiClient` is built once at startup and borrowed by every call site. Each
//! call goes through three steps:
//! - `build` / `build_json` produce an `HttpRequest` and attach the bearer
//!   token if the session store has one.
//! - `send` hands the request to the `Transport`, bounded by the client-wide
//!   timeout.
//! - `parse_response` sorts the answer: 401 clears the session and redirects
//!   to login before the error reaches the caller, other non-2xx statuses
//!   become errors, and 2xx responses pass through untouched.
//!
//! Calls are independent and at-most-once. Nothing is retried.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::api::{AuthApi, EventsApi, MessagesApi, PostsApi};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::{Navigator, SessionStore};
use crate::transport::{ReqwestTransport, Transport};

/// Campus API client: configuration, transport and session capabilities.
pub struct ApiClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient<ReqwestTransport> {
    /// Client for `CAMPUS_API_URL` (or the localhost default) over reqwest.
    pub fn from_env(
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let config = ClientConfig::from_env();
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::new(config, transport, session, navigator))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(
        config: ClientConfig,
        transport: T,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            transport,
            session,
            navigator,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn auth(&self) -> AuthApi<'_, T> {
        AuthApi::new(self)
    }

    pub fn posts(&self) -> PostsApi<'_, T> {
        PostsApi::new(self)
    }

    pub fn messages(&self) -> MessagesApi<'_, T> {
        MessagesApi::new(self)
    }

    pub fn events(&self) -> EventsApi<'_, T> {
        EventsApi::new(self)
    }

    /// Build a request for `path` (relative to the base URL) without a body.
    pub fn build(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(token) = self.session.token() {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        HttpRequest {
            method,
            path: self.config.url(path),
            headers,
            body: None,
        }
    }

    /// Build a request carrying `payload` as a JSON body.
    pub fn build_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut request = self.build(method, path);
        request
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        request.body = Some(body);
        Ok(request)
    }

    /// Execute `request` and run the response interceptor on the outcome.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.path, "sending request");

        let timeout = self.config.timeout;
        let response = match tokio::time::timeout(timeout, self.transport.execute(request)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout { after: timeout }),
        };

        match response {
            Ok(response) => self.parse_response(response),
            Err(e) => {
                if e.is_timeout() {
                    warn!(?timeout, "request timed out");
                } else {
                    debug!(error = %e, "request failed");
                }
                Err(e)
            }
        }
    }

    /// Response interceptor. On 401 the stored token is cleared and the
    /// navigator redirects to login; the error is still returned.
    pub fn parse_response(&self, response: HttpResponse) -> Result<HttpResponse, ApiError> {
        debug!(status = response.status, "response received");
        if response.status == 401 {
            warn!("unauthorized response, clearing session");
            self.session.clear_token();
            self.navigator.redirect_to_login();
        }
        check_status(response)
    }

    pub(crate) async fn call(&self, method: HttpMethod, path: &str) -> Result<HttpResponse, ApiError> {
        self.send(self.build(method, path)).await
    }

    pub(crate) async fn call_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: &B,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build_json(method, path, payload)?;
        self.send(request).await
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    match response.status {
        200..=299 => Ok(response),
        401 => Err(ApiError::Unauthorized {
            body: response.body,
        }),
        404 => Err(ApiError::NotFound {
            body: response.body,
        }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body,
        }),
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::testing::{harness, StubTransport};
    use super::*;

    #[test]
    fn build_attaches_bearer_token_when_stored() {
        let h = harness(StubTransport::responding(200, "{}"), Some("tok-123"));
        let req = h.client.build(HttpMethod::Get, "/posts");
        assert_eq!(req.path, "http://localhost:5000/api/posts");
        assert_eq!(req.header("authorization"), Some("Bearer tok-123"));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_omits_authorization_without_token() {
        let h = harness(StubTransport::responding(200, "{}"), None);
        let req = h.client.build(HttpMethod::Get, "/posts");
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_json_sets_content_type_and_body() {
        let h = harness(StubTransport::responding(200, "{}"), None);
        let req = h
            .client
            .build_json(HttpMethod::Post, "/auth/login", &serde_json::json!({"email": "a@b.c"}))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["email"], "a@b.c");
    }

    #[tokio::test]
    async fn token_is_read_per_request() {
        let h = harness(StubTransport::responding(200, "[]"), None);
        h.client.call(HttpMethod::Get, "/events").await.unwrap();
        assert!(h.client.transport().last_request().header("authorization").is_none());

        h.session.set_token("fresh".to_string());
        h.client.call(HttpMethod::Get, "/events").await.unwrap();
        assert_eq!(
            h.client.transport().last_request().header("authorization"),
            Some("Bearer fresh")
        );
    }

    #[tokio::test]
    async fn success_passes_response_through_unchanged() {
        let h = harness(StubTransport::responding(201, r#"{"id":"p1"}"#), Some("t"));
        let resp = h.client.call(HttpMethod::Post, "/posts").await.unwrap();
        assert_eq!(resp.status, 201);
        assert_eq!(resp.body, r#"{"id":"p1"}"#);
        assert_eq!(h.navigator.redirects(), 0);
        assert_eq!(h.session.token().as_deref(), Some("t"));
    }

    #[tokio::test]
    async fn unauthorized_clears_token_redirects_once_and_propagates() {
        let h = harness(
            StubTransport::responding(401, r#"{"message":"Token expired"}"#),
            Some("stale"),
        );
        let err = h.client.call(HttpMethod::Get, "/auth/profile").await.unwrap_err();

        assert!(matches!(&err, ApiError::Unauthorized { body } if body.contains("Token expired")));
        assert_eq!(h.session.token(), None);
        assert_eq!(h.navigator.redirects(), 1);
    }

    #[tokio::test]
    async fn other_errors_leave_session_alone() {
        let h = harness(StubTransport::responding(500, "boom"), Some("t"));
        let err = h.client.call(HttpMethod::Get, "/posts").await.unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
        assert_eq!(h.session.token().as_deref(), Some("t"));
        assert_eq!(h.navigator.redirects(), 0);
    }

    #[tokio::test]
    async fn not_found_has_dedicated_variant() {
        let h = harness(StubTransport::responding(404, "missing"), None);
        let err = h.client.call(HttpMethod::Get, "/posts/nope").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[tokio::test]
    async fn slow_request_times_out_without_body() {
        let mut transport = StubTransport::responding(200, "late");
        transport.delay = Some(Duration::from_millis(500));
        let session = Arc::new(crate::session::MemorySessionStore::new());
        let navigator = Arc::new(crate::session::RecordingNavigator::new());
        let client = ApiClient::new(
            ClientConfig::new("http://localhost:5000/api").with_timeout(Duration::from_millis(20)),
            transport,
            session,
            navigator.clone(),
        );

        let err = client.call(HttpMethod::Get, "/events").await.unwrap_err();
        assert!(err.is_timeout());
        assert!(err.body().is_none());
        assert_eq!(navigator.redirects(), 0);
    }
}
