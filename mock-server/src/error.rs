use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campus_core::ProfileError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Not authorized, token missing or invalid")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not allowed to modify this {0}")]
    Forbidden(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::Unauthorized | ServerError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

impl From<ProfileError> for ServerError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::MissingUserId => ServerError::BadRequest(err.to_string()),
            ProfileError::Duplicate(_) => ServerError::Conflict(err.to_string()),
            ProfileError::NotFound(_) => ServerError::NotFound("Profile"),
        }
    }
}
