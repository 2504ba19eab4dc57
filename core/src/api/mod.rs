//! Grouped facade functions, one group per REST resource.
//!
//! Every function maps onto exactly one endpoint and returns the raw
//! `HttpResponse`. Payloads are forwarded as-is; nothing is validated or
//! reshaped locally.

mod auth;
mod events;
mod messages;
mod posts;

pub use auth::AuthApi;
pub use events::EventsApi;
pub use messages::MessagesApi;
pub use posts::PostsApi;
