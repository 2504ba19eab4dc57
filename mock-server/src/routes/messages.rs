use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use campus_core::types::{Conversation, Message, NewConversation, NewMessage};
use chrono::Utc;
use tracing::debug;

use super::{new_id, CurrentUser};
use crate::{AppState, ServerError};

pub async fn list_conversations(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Json<Vec<Conversation>> {
    let store = state.store.read().await;
    let mut conversations: Vec<Conversation> = store
        .conversations
        .values()
        .filter(|c| c.participants.contains(&user_id))
        .cloned()
        .collect();
    conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Json(conversations)
}

/// Returns the existing conversation between the two users, or starts one.
pub async fn create_conversation(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(input): Json<NewConversation>,
) -> Result<(StatusCode, Json<Conversation>), ServerError> {
    if input.participant_id == user_id {
        return Err(ServerError::BadRequest("Cannot start a conversation with yourself".into()));
    }

    let mut store = state.store.write().await;
    if !store.accounts.contains_key(&input.participant_id) {
        return Err(ServerError::NotFound("User"));
    }

    let existing = store.conversations.values().find(|c| {
        c.participants.contains(&user_id) && c.participants.contains(&input.participant_id)
    });
    if let Some(conversation) = existing {
        return Ok((StatusCode::OK, Json(conversation.clone())));
    }

    let conversation = Conversation {
        id: new_id(),
        participants: vec![user_id, input.participant_id],
        last_message: None,
        updated_at: Utc::now(),
    };
    store
        .conversations
        .insert(conversation.id.clone(), conversation.clone());
    debug!(conversation_id = %conversation.id, "conversation started");
    Ok((StatusCode::CREATED, Json(conversation)))
}

pub async fn list_messages(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(conversation_id): Path<String>,
) -> Result<Json<Vec<Message>>, ServerError> {
    let store = state.store.read().await;
    let conversation = store
        .conversations
        .get(&conversation_id)
        .ok_or(ServerError::NotFound("Conversation"))?;
    if !conversation.participants.contains(&user_id) {
        return Err(ServerError::Forbidden("conversation"));
    }
    Ok(Json(
        store
            .messages
            .get(&conversation_id)
            .cloned()
            .unwrap_or_default(),
    ))
}

pub async fn send_message(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(conversation_id): Path<String>,
    Json(input): Json<NewMessage>,
) -> Result<(StatusCode, Json<Message>), ServerError> {
    if input.content.trim().is_empty() {
        return Err(ServerError::BadRequest("Message content is required".into()));
    }

    let mut store = state.store.write().await;
    let conversation = store
        .conversations
        .get_mut(&conversation_id)
        .ok_or(ServerError::NotFound("Conversation"))?;
    if !conversation.participants.contains(&user_id) {
        return Err(ServerError::Forbidden("conversation"));
    }

    let message = Message {
        id: new_id(),
        conversation_id: conversation_id.clone(),
        sender_id: user_id,
        content: input.content,
        created_at: Utc::now(),
    };
    conversation.last_message = Some(message.content.clone());
    conversation.updated_at = message.created_at;

    store
        .messages
        .entry(conversation_id)
        .or_default()
        .push(message.clone());
    debug!(conversation_id = %message.conversation_id, "message sent");
    Ok((StatusCode::CREATED, Json(message)))
}
