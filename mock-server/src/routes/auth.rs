use axum::{extract::State, http::StatusCode, Json};
use campus_core::{
    types::{AuthResponse, Credentials, PasswordChange, ProfileResponse, Registration, User},
    StudentProfile, StudentProfileUpdate,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::{new_id, CurrentUser};
use crate::{Account, AppState, ServerError};

pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<Registration>,
) -> Result<(StatusCode, Json<AuthResponse>), ServerError> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(ServerError::BadRequest("Email and password are required".into()));
    }

    let mut store = state.store.write().await;
    if store.accounts.values().any(|a| a.user.email == input.email) {
        return Err(ServerError::Conflict("User already exists".into()));
    }

    let user = User {
        id: new_id(),
        name: input.name,
        email: input.email,
        created_at: Utc::now(),
    };
    let token = new_id();
    store.sessions.insert(token.clone(), user.id.clone());
    store.accounts.insert(
        user.id.clone(),
        Account {
            user: user.clone(),
            password: input.password,
        },
    );
    info!(user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<Credentials>,
) -> Result<Json<AuthResponse>, ServerError> {
    let mut store = state.store.write().await;
    let user = store
        .accounts
        .values()
        .find(|a| a.user.email == input.email && a.password == input.password)
        .map(|a| a.user.clone())
        .ok_or(ServerError::InvalidCredentials)?;

    let token = new_id();
    store.sessions.insert(token.clone(), user.id.clone());
    info!(user_id = %user.id, "user logged in");

    Ok(Json(AuthResponse { token, user }))
}

pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<ProfileResponse>, ServerError> {
    let user = state
        .store
        .read()
        .await
        .accounts
        .get(&user_id)
        .map(|a| a.user.clone())
        .ok_or(ServerError::NotFound("User"))?;
    let profile = state.profiles.get(&user_id).await.ok();

    Ok(Json(ProfileResponse { user, profile }))
}

/// Updates the caller's profile, creating it on first save (onboarding).
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(update): Json<StudentProfileUpdate>,
) -> Result<Json<StudentProfile>, ServerError> {
    let profile = state.profiles.upsert(&user_id, update).await?;
    debug!(%user_id, "profile saved");
    Ok(Json(profile))
}

pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(input): Json<PasswordChange>,
) -> Result<Json<Value>, ServerError> {
    let mut store = state.store.write().await;
    let account = store
        .accounts
        .get_mut(&user_id)
        .ok_or(ServerError::NotFound("User"))?;
    if account.password != input.current_password {
        return Err(ServerError::BadRequest("Current password is incorrect".into()));
    }
    account.password = input.new_password;

    Ok(Json(json!({ "message": "Password updated" })))
}

pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
) -> Json<Vec<User>> {
    let store = state.store.read().await;
    let mut users: Vec<User> = store.accounts.values().map(|a| a.user.clone()).collect();
    users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Json(users)
}
