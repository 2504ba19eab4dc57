use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use campus_core::types::{Comment, NewComment, NewPost, Post, PostUpdate};
use chrono::Utc;
use tracing::debug;

use super::{new_id, CurrentUser};
use crate::{AppState, ServerError};

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

pub async fn list_posts(State(state): State<AppState>, CurrentUser(_): CurrentUser) -> Json<Vec<Post>> {
    let store = state.store.read().await;
    Json(newest_first(store.posts.values().cloned().collect()))
}

pub async fn my_posts(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Json<Vec<Post>> {
    let store = state.store.read().await;
    Json(newest_first(
        store
            .posts
            .values()
            .filter(|p| p.author_id == user_id)
            .cloned()
            .collect(),
    ))
}

pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(input): Json<NewPost>,
) -> Result<(StatusCode, Json<Post>), ServerError> {
    if input.content.trim().is_empty() {
        return Err(ServerError::BadRequest("Post content is required".into()));
    }
    let now = Utc::now();
    let post = Post {
        id: new_id(),
        author_id: user_id,
        title: input.title,
        content: input.content,
        tags: input.tags,
        likes: Vec::new(),
        comments: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    state.store.write().await.posts.insert(post.id.clone(), post.clone());
    debug!(post_id = %post.id, author_id = %post.author_id, "post created");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_post(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Post>, ServerError> {
    let store = state.store.read().await;
    store.posts.get(&id).cloned().map(Json).ok_or(ServerError::NotFound("Post"))
}

pub async fn update_post(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<PostUpdate>,
) -> Result<Json<Post>, ServerError> {
    let mut store = state.store.write().await;
    let post = store.posts.get_mut(&id).ok_or(ServerError::NotFound("Post"))?;
    if post.author_id != user_id {
        return Err(ServerError::Forbidden("post"));
    }
    if let Some(title) = input.title {
        post.title = Some(title);
    }
    if let Some(content) = input.content {
        post.content = content;
    }
    if let Some(tags) = input.tags {
        post.tags = tags;
    }
    post.updated_at = Utc::now();
    Ok(Json(post.clone()))
}

pub async fn delete_post(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut store = state.store.write().await;
    let post = store.posts.get(&id).ok_or(ServerError::NotFound("Post"))?;
    if post.author_id != user_id {
        return Err(ServerError::Forbidden("post"));
    }
    store.posts.remove(&id);
    debug!(post_id = %id, "post deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Toggles the caller's like.
pub async fn like_post(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Post>, ServerError> {
    let mut store = state.store.write().await;
    let post = store.posts.get_mut(&id).ok_or(ServerError::NotFound("Post"))?;
    if let Some(pos) = post.likes.iter().position(|u| *u == user_id) {
        post.likes.remove(pos);
    } else {
        post.likes.push(user_id);
    }
    Ok(Json(post.clone()))
}

pub async fn add_comment(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<NewComment>,
) -> Result<(StatusCode, Json<Post>), ServerError> {
    if input.content.trim().is_empty() {
        return Err(ServerError::BadRequest("Comment content is required".into()));
    }
    let mut store = state.store.write().await;
    let post = store.posts.get_mut(&id).ok_or(ServerError::NotFound("Post"))?;
    post.comments.push(Comment {
        id: new_id(),
        author_id: user_id,
        content: input.content,
        created_at: Utc::now(),
    });
    Ok((StatusCode::CREATED, Json(post.clone())))
}

/// Either the comment author or the post author may delete a comment.
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Post>, ServerError> {
    let mut store = state.store.write().await;
    let post = store.posts.get_mut(&id).ok_or(ServerError::NotFound("Post"))?;
    let pos = post
        .comments
        .iter()
        .position(|c| c.id == comment_id)
        .ok_or(ServerError::NotFound("Comment"))?;
    if post.comments[pos].author_id != user_id && post.author_id != user_id {
        return Err(ServerError::Forbidden("comment"));
    }
    post.comments.remove(pos);
    Ok(Json(post.clone()))
}
