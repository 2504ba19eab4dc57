//! Error types for the campus client and the profile store.
//!
//! # Design
//! `Unauthorized` and `NotFound` get dedicated variants because callers
//! branch on them. Every other non-2xx response lands in `HttpError` with the
//! raw status and body. Transport failures and timeouts never carry a body.

use std::time::Duration;

/// Errors returned by `ApiClient` and the grouped facades.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The request exceeded the client-wide timeout and was aborted.
    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    /// The server returned 401. The stored session has already been cleared.
    #[error("unauthorized: {body}")]
    Unauthorized { body: String },

    /// The server returned 404.
    #[error("resource not found: {body}")]
    NotFound { body: String },

    /// The server returned a non-2xx status other than 401 and 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::NotFound { .. } => Some(404),
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body carried by the error. `None` for transport failures,
    /// timeouts and serde errors.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { body }
            | ApiError::NotFound { body }
            | ApiError::HttpError { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }
}

/// Errors raised at the student profile persistence boundary.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("userId is required")]
    MissingUserId,

    #[error("a profile already exists for user {0}")]
    Duplicate(String),

    #[error("no profile for user {0}")]
    NotFound(String),
}
