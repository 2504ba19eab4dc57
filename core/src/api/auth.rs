use serde::Serialize;
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse};
use crate::transport::Transport;

/// Session and account endpoints under `/auth`.
pub struct AuthApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AuthApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `POST /auth/login`. The returned token is not stored automatically;
    /// hand it to the session store once the caller accepts the login.
    #[instrument(skip_all)]
    pub async fn login<B: Serialize + ?Sized>(&self, credentials: &B) -> Result<HttpResponse, ApiError> {
        self.client.call_json(HttpMethod::Post, "/auth/login", credentials).await
    }

    #[instrument(skip_all)]
    pub async fn register<B: Serialize + ?Sized>(&self, data: &B) -> Result<HttpResponse, ApiError> {
        self.client.call_json(HttpMethod::Post, "/auth/register", data).await
    }

    #[instrument(skip(self))]
    pub async fn get_profile(&self) -> Result<HttpResponse, ApiError> {
        self.client.call(HttpMethod::Get, "/auth/profile").await
    }

    #[instrument(skip_all)]
    pub async fn update_profile<B: Serialize + ?Sized>(&self, data: &B) -> Result<HttpResponse, ApiError> {
        self.client.call_json(HttpMethod::Put, "/auth/profile", data).await
    }

    #[instrument(skip_all)]
    pub async fn change_password<B: Serialize + ?Sized>(&self, data: &B) -> Result<HttpResponse, ApiError> {
        self.client
            .call_json(HttpMethod::Post, "/auth/change-password", data)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_all_users(&self) -> Result<HttpResponse, ApiError> {
        self.client.call(HttpMethod::Get, "/auth/users").await
    }
}
