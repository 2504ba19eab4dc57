use serde::Serialize;
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse};
use crate::transport::Transport;

/// Conversations and direct messages under `/messages`.
pub struct MessagesApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> MessagesApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn get_conversations(&self) -> Result<HttpResponse, ApiError> {
        self.client.call(HttpMethod::Get, "/messages/conversations").await
    }

    #[instrument(skip(self))]
    pub async fn get_messages(&self, conversation_id: &str) -> Result<HttpResponse, ApiError> {
        self.client
            .call(HttpMethod::Get, &format!("/messages/{conversation_id}"))
            .await
    }

    #[instrument(skip(self, data))]
    pub async fn send_message<B: Serialize + ?Sized>(
        &self,
        conversation_id: &str,
        data: &B,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .call_json(HttpMethod::Post, &format!("/messages/{conversation_id}"), data)
            .await
    }

    #[instrument(skip_all)]
    pub async fn create_conversation<B: Serialize + ?Sized>(
        &self,
        data: &B,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .call_json(HttpMethod::Post, "/messages/conversations", data)
            .await
    }
}
