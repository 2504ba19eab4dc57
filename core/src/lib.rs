//! Client core for the campus API.
//!
//! # Overview
//! Two pieces live here:
//! - the `StudentProfile` record with its defaults and the
//!   [`ProfileRepository`] that enforces one profile per user;
//! - [`ApiClient`], a shared HTTP client with grouped facades (`auth`,
//!   `posts`, `messages`, `events`) that forward one-to-one onto REST
//!   endpoints.
//!
//! # Design
//! - Token storage and login navigation are injected as [`SessionStore`] and
//!   [`Navigator`], so interceptor behaviour is testable without a browser.
//! - Network I/O sits behind [`Transport`]; [`ReqwestTransport`] is the
//!   production implementation.
//! - Facade functions return the raw [`HttpResponse`]; decode with
//!   [`HttpResponse::json`] into the DTOs in [`types`] when needed.
//!
//! ```no_run
//! # async fn example() -> Result<(), campus_core::ApiError> {
//! use std::sync::Arc;
//! use campus_core::{ApiClient, MemorySessionStore, NoopNavigator};
//!
//! let client = ApiClient::from_env(
//!     Arc::new(MemorySessionStore::new()),
//!     Arc::new(NoopNavigator),
//! )?;
//! let response = client.posts().like_post("post123").await?;
//! println!("{}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod profile;
pub mod session;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ProfileError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use profile::{NewStudentProfile, ProfileRepository, StudentProfile, StudentProfileUpdate};
pub use session::{MemorySessionStore, Navigator, NoopNavigator, RecordingNavigator, SessionStore};
pub use transport::{ReqwestTransport, Transport};
