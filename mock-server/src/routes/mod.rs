pub mod auth;
pub mod events;
pub mod messages;
pub mod posts;

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use uuid::Uuid;

use crate::{AppState, ServerError};

/// Id of the user owning the request's bearer token.
pub struct CurrentUser(pub String);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(ServerError::Unauthorized)?;

        state
            .store
            .read()
            .await
            .sessions
            .get(token)
            .cloned()
            .map(CurrentUser)
            .ok_or(ServerError::Unauthorized)
    }
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
