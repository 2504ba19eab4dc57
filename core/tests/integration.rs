//! End-to-end tests of the facades against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port and drives it through
//! `ApiClient` over `ReqwestTransport`, so request building, the
//! interceptors and response handling run against a real HTTP stack.

use std::sync::Arc;
use std::time::Duration;

use campus_core::types::{
    AuthResponse, Conversation, Credentials, Event, EventUpdate, Message, NewComment, NewConversation,
    NewEvent, NewMessage, NewPost, PasswordChange, Post, ProfileResponse, Registration, User,
};
use campus_core::{
    ApiClient, ApiError, ClientConfig, MemorySessionStore, RecordingNavigator, ReqwestTransport,
    SessionStore, StudentProfile, StudentProfileUpdate,
};
use campus_mock_server::AppState;
use chrono::{TimeZone, Utc};
use tokio::net::TcpListener;

struct TestClient {
    client: ApiClient<ReqwestTransport>,
    session: Arc<MemorySessionStore>,
    navigator: Arc<RecordingNavigator>,
}

fn client_for(base_url: &str, timeout: Duration) -> TestClient {
    let config = ClientConfig::new(base_url).with_timeout(timeout);
    let transport = ReqwestTransport::new(config.timeout).unwrap();
    let session = Arc::new(MemorySessionStore::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let client = ApiClient::new(config, transport, session.clone(), navigator.clone());
    TestClient {
        client,
        session,
        navigator,
    }
}

async fn start_server() -> (String, AppState) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::default();
    tokio::spawn(campus_mock_server::run_with_state(listener, state.clone()));
    (format!("http://{addr}"), state)
}

/// Register through the facade and keep the returned token, as a login
/// screen would.
async fn sign_up(t: &TestClient, name: &str, email: &str) -> User {
    let resp = t
        .client
        .auth()
        .register(&Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(resp.status, 201);
    let auth: AuthResponse = resp.json().unwrap();
    t.session.set_token(auth.token);
    auth.user
}

#[tokio::test]
async fn auth_and_profile_flow() {
    let (base, _state) = start_server().await;
    let t = client_for(&base, Duration::from_secs(10));

    let user = sign_up(&t, "Ada", "ada@campus.edu").await;

    let profile: ProfileResponse = t.client.auth().get_profile().await.unwrap().json().unwrap();
    assert_eq!(profile.user, user);
    assert!(profile.profile.is_none());

    let update = StudentProfileUpdate {
        full_name: Some(Some("Ada Lovelace".into())),
        department: Some(Some("Mathematics".into())),
        current_year: Some(Some(2)),
        enrollment_year: Some(Some(2024)),
        interests: Some(vec!["analysis".into(), "engines".into()]),
        ..Default::default()
    };
    let saved: StudentProfile = t
        .client
        .auth()
        .update_profile(&update)
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(saved.user_id, user.id);
    assert_eq!(saved.department.as_deref(), Some("Mathematics"));
    assert_eq!(saved.current_year, Some(2));
    assert!(!saved.profile_complete);
    assert_eq!(saved.profile_strength, 0);

    t.client
        .auth()
        .change_password(&PasswordChange {
            current_password: "secret".into(),
            new_password: "better".into(),
        })
        .await
        .unwrap();

    t.session.clear_token();
    let resp = t
        .client
        .auth()
        .login(&Credentials {
            email: "ada@campus.edu".into(),
            password: "better".into(),
        })
        .await
        .unwrap();
    let auth: AuthResponse = resp.json().unwrap();
    t.session.set_token(auth.token);

    let users: Vec<User> = t.client.auth().get_all_users().await.unwrap().json().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(t.navigator.redirects(), 0);
}

#[tokio::test]
async fn posts_flow() {
    let (base, _state) = start_server().await;
    let t = client_for(&base, Duration::from_secs(10));
    sign_up(&t, "Ada", "ada@campus.edu").await;
    let posts = t.client.posts();

    let created: Post = posts
        .create_post(&NewPost {
            title: None,
            content: "Looking for a study group".into(),
            tags: vec!["study".into()],
        })
        .await
        .unwrap()
        .json()
        .unwrap();

    let liked: Post = posts.like_post(&created.id).await.unwrap().json().unwrap();
    assert_eq!(liked.likes.len(), 1);

    let commented: Post = posts
        .add_comment(&created.id, &NewComment { content: "count me in".into() })
        .await
        .unwrap()
        .json()
        .unwrap();
    let comment_id = &commented.comments[0].id;
    posts.delete_comment(&created.id, comment_id).await.unwrap();

    let updated: Post = posts
        .update_post(&created.id, &serde_json::json!({"title": "Study group"}))
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(updated.title.as_deref(), Some("Study group"));
    assert!(updated.comments.is_empty());

    let mine: Vec<Post> = posts.get_my_posts().await.unwrap().json().unwrap();
    assert_eq!(mine.len(), 1);
    let all: Vec<Post> = posts.get_posts().await.unwrap().json().unwrap();
    assert_eq!(all.len(), 1);

    let resp = posts.delete_post(&created.id).await.unwrap();
    assert_eq!(resp.status, 204);

    let err = posts.get_post(&created.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
    // A 404 is not a session problem.
    assert!(t.session.token().is_some());
    assert_eq!(t.navigator.redirects(), 0);
}

#[tokio::test]
async fn messages_flow() {
    let (base, _state) = start_server().await;
    let ada = client_for(&base, Duration::from_secs(10));
    let bob = client_for(&base, Duration::from_secs(10));
    sign_up(&ada, "Ada", "ada@campus.edu").await;
    let bob_user = sign_up(&bob, "Bob", "bob@campus.edu").await;

    let conversation: Conversation = ada
        .client
        .messages()
        .create_conversation(&NewConversation {
            participant_id: bob_user.id.clone(),
        })
        .await
        .unwrap()
        .json()
        .unwrap();

    let sent: Message = ada
        .client
        .messages()
        .send_message(&conversation.id, &NewMessage { content: "hi Bob".into() })
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(sent.conversation_id, conversation.id);

    let inbox: Vec<Conversation> = bob
        .client
        .messages()
        .get_conversations()
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].last_message.as_deref(), Some("hi Bob"));

    let thread: Vec<Message> = bob
        .client
        .messages()
        .get_messages(&conversation.id)
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(thread, vec![sent]);
}

#[tokio::test]
async fn events_flow() {
    let (base, _state) = start_server().await;
    let t = client_for(&base, Duration::from_secs(10));
    let user = sign_up(&t, "Ada", "ada@campus.edu").await;
    let events = t.client.events();

    let event: Event = events
        .create_event(&NewEvent {
            title: "Alumni mixer".into(),
            description: "Meet recent grads".into(),
            location: Some("Hall B".into()),
            starts_at: Utc.with_ymd_and_hms(2026, 11, 20, 18, 0, 0).unwrap(),
        })
        .await
        .unwrap()
        .json()
        .unwrap();

    let joined: Event = events.join_event(&event.id).await.unwrap().json().unwrap();
    assert_eq!(joined.attendees, vec![user.id.clone()]);

    let left: Event = events.leave_event(&event.id).await.unwrap().json().unwrap();
    assert!(left.attendees.is_empty());

    let moved: Event = events
        .update_event(
            &event.id,
            &EventUpdate {
                location: Some("Hall C".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(moved.location.as_deref(), Some("Hall C"));

    let fetched: Event = events.get_event(&event.id).await.unwrap().json().unwrap();
    assert_eq!(fetched, moved);

    let listed: Vec<Event> = events.get_events().await.unwrap().json().unwrap();
    assert_eq!(listed.len(), 1);

    events.delete_event(&event.id).await.unwrap();
    assert!(matches!(
        events.get_event(&event.id).await.unwrap_err(),
        ApiError::NotFound { .. }
    ));
}

#[tokio::test]
async fn revoked_session_clears_token_and_redirects_once() {
    let (base, state) = start_server().await;
    let t = client_for(&base, Duration::from_secs(10));
    let user = sign_up(&t, "Ada", "ada@campus.edu").await;

    state.revoke_sessions(&user.id).await;

    let err = t.client.posts().get_posts().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(err.status(), Some(401));
    assert!(t.session.token().is_none());
    assert_eq!(t.navigator.redirects(), 1);

    // Later requests go out without a bearer header.
    let req = t.client.build(campus_core::HttpMethod::Get, "/posts");
    assert!(req.header("authorization").is_none());
}

#[tokio::test]
async fn unresponsive_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    // Accept connections and never answer.
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let t = client_for(&format!("http://{addr}"), Duration::from_millis(200));
    let err = t.client.events().get_events().await.unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert!(err.body().is_none());
    assert_eq!(t.navigator.redirects(), 0);
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let t = client_for(&format!("http://{addr}"), Duration::from_secs(5));
    let err = t.client.posts().get_posts().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}
