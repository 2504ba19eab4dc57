//! In-memory stand-in for the campus REST API.
//!
//! Serves every endpoint the client facades consume so the client can be
//! exercised end to end over real HTTP. Nothing is persisted; each call to
//! [`app`] starts from an empty store.

use std::{collections::HashMap, sync::Arc};

use axum::{
    routing::{delete, get, post},
    Router,
};
use campus_core::{
    types::{Conversation, Event, Message, Post, User},
    ProfileRepository,
};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod routes;

pub use error::ServerError;

/// A registered user with the password it signs in with.
#[derive(Debug, Clone)]
pub struct Account {
    pub user: User,
    pub password: String,
}

#[derive(Debug, Default)]
pub struct Store {
    pub accounts: HashMap<String, Account>,
    /// Bearer token to user id.
    pub sessions: HashMap<String, String>,
    pub posts: HashMap<String, Post>,
    pub conversations: HashMap<String, Conversation>,
    pub messages: HashMap<String, Vec<Message>>,
    pub events: HashMap<String, Event>,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
    pub profiles: ProfileRepository,
}

impl AppState {
    /// Drop every issued token for `user_id`, as if the session expired.
    pub async fn revoke_sessions(&self, user_id: &str) {
        self.store
            .write()
            .await
            .sessions
            .retain(|_, owner| owner != user_id);
    }
}

pub fn app() -> Router {
    app_with_state(AppState::default())
}

pub fn app_with_state(state: AppState) -> Router {
    use routes::{auth, events, messages, posts};

    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/profile", get(auth::get_profile).put(auth::update_profile))
        .route("/auth/change-password", post(auth::change_password))
        .route("/auth/users", get(auth::list_users))
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/posts/my-posts", get(posts::my_posts))
        .route(
            "/posts/{id}",
            get(posts::get_post).put(posts::update_post).delete(posts::delete_post),
        )
        .route("/posts/{id}/like", post(posts::like_post))
        .route("/posts/{id}/comments", post(posts::add_comment))
        .route("/posts/{id}/comments/{comment_id}", delete(posts::delete_comment))
        .route(
            "/messages/conversations",
            get(messages::list_conversations).post(messages::create_conversation),
        )
        .route(
            "/messages/{conversation_id}",
            get(messages::list_messages).post(messages::send_message),
        )
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/{id}",
            get(events::get_event).put(events::update_event).delete(events::delete_event),
        )
        .route("/events/{id}/join", post(events::join_event))
        .route("/events/{id}/leave", post(events::leave_event))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, AppState::default()).await
}

pub async fn run_with_state(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock campus API listening");
    }
    axum::serve(listener, app_with_state(state)).await
}
