use serde::Serialize;
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse};
use crate::transport::Transport;

/// Event management and attendance under `/events`.
pub struct EventsApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> EventsApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn get_events(&self) -> Result<HttpResponse, ApiError> {
        self.client.call(HttpMethod::Get, "/events").await
    }

    #[instrument(skip_all)]
    pub async fn create_event<B: Serialize + ?Sized>(&self, data: &B) -> Result<HttpResponse, ApiError> {
        self.client.call_json(HttpMethod::Post, "/events", data).await
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, id: &str) -> Result<HttpResponse, ApiError> {
        self.client.call(HttpMethod::Get, &format!("/events/{id}")).await
    }

    #[instrument(skip(self, data))]
    pub async fn update_event<B: Serialize + ?Sized>(
        &self,
        id: &str,
        data: &B,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .call_json(HttpMethod::Put, &format!("/events/{id}"), data)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: &str) -> Result<HttpResponse, ApiError> {
        self.client.call(HttpMethod::Delete, &format!("/events/{id}")).await
    }

    #[instrument(skip(self))]
    pub async fn join_event(&self, id: &str) -> Result<HttpResponse, ApiError> {
        self.client.call(HttpMethod::Post, &format!("/events/{id}/join")).await
    }

    #[instrument(skip(self))]
    pub async fn leave_event(&self, id: &str) -> Result<HttpResponse, ApiError> {
        self.client.call(HttpMethod::Post, &format!("/events/{id}/leave")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::{harness, StubTransport};
    use crate::http::HttpMethod;

    const BASE: &str = "http://localhost:5000/api";

    #[tokio::test]
    async fn event_endpoints() {
        let h = harness(StubTransport::responding(200, "{}"), Some("t"));
        let events = h.client.events();

        let cases: Vec<(HttpMethod, String)> = vec![
            (HttpMethod::Get, "/events".into()),
            (HttpMethod::Get, "/events/e1".into()),
            (HttpMethod::Delete, "/events/e1".into()),
            (HttpMethod::Post, "/events/e1/join".into()),
            (HttpMethod::Post, "/events/e1/leave".into()),
        ];

        events.get_events().await.unwrap();
        events.get_event("e1").await.unwrap();
        events.delete_event("e1").await.unwrap();
        events.join_event("e1").await.unwrap();
        events.leave_event("e1").await.unwrap();

        let seen = h.client.transport().seen.lock().unwrap().clone();
        assert_eq!(seen.len(), cases.len());
        for (req, (method, path)) in seen.iter().zip(cases) {
            assert_eq!(req.method, method);
            assert_eq!(req.path, format!("{BASE}{path}"));
            assert!(req.body.is_none(), "{path} should have no body");
        }
    }

    #[tokio::test]
    async fn create_and_update_carry_json() {
        let h = harness(StubTransport::responding(201, "{}"), Some("t"));

        h.client
            .events()
            .create_event(&serde_json::json!({"title": "Hack night"}))
            .await
            .unwrap();
        let req = h.client.transport().last_request();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, format!("{BASE}/events"));
        assert_eq!(req.header("content-type"), Some("application/json"));

        h.client
            .events()
            .update_event("e1", &serde_json::json!({"location": "Room 101"}))
            .await
            .unwrap();
        let req = h.client.transport().last_request();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, format!("{BASE}/events/e1"));
        assert_eq!(req.body.as_deref(), Some(r#"{"location":"Room 101"}"#));
    }
}
