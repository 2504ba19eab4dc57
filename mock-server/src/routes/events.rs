use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use campus_core::types::{Event, EventUpdate, NewEvent};
use chrono::Utc;
use tracing::debug;

use super::{new_id, CurrentUser};
use crate::{AppState, ServerError};

/// Upcoming first.
pub async fn list_events(State(state): State<AppState>, CurrentUser(_): CurrentUser) -> Json<Vec<Event>> {
    let store = state.store.read().await;
    let mut events: Vec<Event> = store.events.values().cloned().collect();
    events.sort_by(|a, b| a.starts_at.cmp(&b.starts_at));
    Json(events)
}

pub async fn create_event(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(input): Json<NewEvent>,
) -> Result<(StatusCode, Json<Event>), ServerError> {
    if input.title.trim().is_empty() {
        return Err(ServerError::BadRequest("Event title is required".into()));
    }
    let event = Event {
        id: new_id(),
        organizer_id: user_id,
        title: input.title,
        description: input.description,
        location: input.location,
        starts_at: input.starts_at,
        attendees: Vec::new(),
        created_at: Utc::now(),
    };
    state.store.write().await.events.insert(event.id.clone(), event.clone());
    debug!(event_id = %event.id, "event created");
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn get_event(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Event>, ServerError> {
    let store = state.store.read().await;
    store.events.get(&id).cloned().map(Json).ok_or(ServerError::NotFound("Event"))
}

pub async fn update_event(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<EventUpdate>,
) -> Result<Json<Event>, ServerError> {
    let mut store = state.store.write().await;
    let event = store.events.get_mut(&id).ok_or(ServerError::NotFound("Event"))?;
    if event.organizer_id != user_id {
        return Err(ServerError::Forbidden("event"));
    }
    if let Some(title) = input.title {
        event.title = title;
    }
    if let Some(description) = input.description {
        event.description = description;
    }
    if let Some(location) = input.location {
        event.location = Some(location);
    }
    if let Some(starts_at) = input.starts_at {
        event.starts_at = starts_at;
    }
    Ok(Json(event.clone()))
}

pub async fn delete_event(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut store = state.store.write().await;
    let event = store.events.get(&id).ok_or(ServerError::NotFound("Event"))?;
    if event.organizer_id != user_id {
        return Err(ServerError::Forbidden("event"));
    }
    store.events.remove(&id);
    debug!(event_id = %id, "event deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Joining twice leaves a single attendee entry.
pub async fn join_event(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Event>, ServerError> {
    let mut store = state.store.write().await;
    let event = store.events.get_mut(&id).ok_or(ServerError::NotFound("Event"))?;
    if !event.attendees.contains(&user_id) {
        event.attendees.push(user_id);
    }
    Ok(Json(event.clone()))
}

pub async fn leave_event(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Event>, ServerError> {
    let mut store = state.store.write().await;
    let event = store.events.get_mut(&id).ok_or(ServerError::NotFound("Event"))?;
    event.attendees.retain(|u| *u != user_id);
    Ok(Json(event.clone()))
}
