use serde::Serialize;
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse};
use crate::transport::Transport;

/// Post CRUD plus likes and comments under `/posts`.
pub struct PostsApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> PostsApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn get_posts(&self) -> Result<HttpResponse, ApiError> {
        self.client.call(HttpMethod::Get, "/posts").await
    }

    #[instrument(skip_all)]
    pub async fn create_post<B: Serialize + ?Sized>(&self, data: &B) -> Result<HttpResponse, ApiError> {
        self.client.call_json(HttpMethod::Post, "/posts", data).await
    }

    #[instrument(skip(self))]
    pub async fn get_post(&self, id: &str) -> Result<HttpResponse, ApiError> {
        self.client.call(HttpMethod::Get, &format!("/posts/{id}")).await
    }

    #[instrument(skip(self, data))]
    pub async fn update_post<B: Serialize + ?Sized>(
        &self,
        id: &str,
        data: &B,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .call_json(HttpMethod::Put, &format!("/posts/{id}"), data)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: &str) -> Result<HttpResponse, ApiError> {
        self.client.call(HttpMethod::Delete, &format!("/posts/{id}")).await
    }

    /// `POST /posts/:id/like` with no body.
    #[instrument(skip(self))]
    pub async fn like_post(&self, id: &str) -> Result<HttpResponse, ApiError> {
        self.client.call(HttpMethod::Post, &format!("/posts/{id}/like")).await
    }

    #[instrument(skip(self, data))]
    pub async fn add_comment<B: Serialize + ?Sized>(
        &self,
        id: &str,
        data: &B,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .call_json(HttpMethod::Post, &format!("/posts/{id}/comments"), data)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(&self, id: &str, comment_id: &str) -> Result<HttpResponse, ApiError> {
        self.client
            .call(HttpMethod::Delete, &format!("/posts/{id}/comments/{comment_id}"))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_my_posts(&self) -> Result<HttpResponse, ApiError> {
        self.client.call(HttpMethod::Get, "/posts/my-posts").await
    }
}
