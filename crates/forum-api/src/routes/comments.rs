use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use forum_persist::{CommentChanges, NewComment};
use crate::{
    error::{ApiError, ApiResult},
    extract::JsonPayload,
    resources::{CommentResource, DataEnvelope},
    scope::{parse_id, resolve_comment, resolve_thread},
    state::AppState,
};

/// List comments in a thread
#[utoipa::path(
    get,
    path = "/v1/threads/{thread_id}/comments",
    params(
        ("thread_id" = i64, Path, description = "Thread ID")
    ),
    responses(
        (status = 200, description = "Comments of the thread under `data`", body = [CommentResource]),
        (status = 404, description = "Thread not found")
    ),
    tag = "comments"
)]
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<DataEnvelope<Vec<CommentResource>>>> {
    let thread = resolve_thread(state.persist.as_ref(), parse_id(&thread_id)?).await?;

    let comments = state.persist.list_comments(thread.id).await?;

    Ok(Json(DataEnvelope::new(CommentResource::collection(comments))))
}

/// Add a comment to a thread
///
/// Any thread reference in the payload is ignored; the comment always
/// belongs to the thread in the path.
#[utoipa::path(
    post,
    path = "/v1/threads/{thread_id}/comments",
    params(
        ("thread_id" = i64, Path, description = "Thread ID")
    ),
    responses(
        (status = 201, description = "Comment created", body = CommentResource),
        (status = 404, description = "Thread not found"),
        (status = 422, description = "Missing or invalid body")
    ),
    tag = "comments"
)]
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
    payload: JsonPayload,
) -> ApiResult<(StatusCode, Json<DataEnvelope<CommentResource>>)> {
    let thread = resolve_thread(state.persist.as_ref(), parse_id(&thread_id)?).await?;
    let new_comment: NewComment = payload.validated()?;

    let comment = state.persist.create_comment(thread.id, new_comment).await?;
    tracing::info!(thread_id = thread.id, comment_id = comment.id, "Comment created");

    Ok((StatusCode::CREATED, Json(DataEnvelope::new(comment.into()))))
}

#[utoipa::path(
    get,
    path = "/v1/threads/{thread_id}/comments/{comment_id}",
    params(
        ("thread_id" = i64, Path, description = "Thread ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment details", body = CommentResource),
        (status = 404, description = "Thread not found, or comment not found in this thread")
    ),
    tag = "comments"
)]
pub async fn get_comment(
    State(state): State<Arc<AppState>>,
    Path((thread_id, comment_id)): Path<(String, String)>,
) -> ApiResult<Json<DataEnvelope<CommentResource>>> {
    let (thread_id, comment_id) = parse_ids(&thread_id, &comment_id)?;
    let (_, comment) = resolve_comment(state.persist.as_ref(), thread_id, comment_id).await?;

    Ok(Json(DataEnvelope::new(comment.into())))
}

#[utoipa::path(
    put,
    path = "/v1/threads/{thread_id}/comments/{comment_id}",
    params(
        ("thread_id" = i64, Path, description = "Thread ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Updated comment", body = CommentResource),
        (status = 404, description = "Thread not found, or comment not found in this thread"),
        (status = 422, description = "Body is not a string")
    ),
    tag = "comments"
)]
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    Path((thread_id, comment_id)): Path<(String, String)>,
    payload: JsonPayload,
) -> ApiResult<Json<DataEnvelope<CommentResource>>> {
    let (thread_id, comment_id) = parse_ids(&thread_id, &comment_id)?;
    let (thread, comment) = resolve_comment(state.persist.as_ref(), thread_id, comment_id).await?;
    let changes: CommentChanges = payload.validated()?;

    let updated = state
        .persist
        .update_comment(thread.id, comment.id, changes)
        .await?
        .ok_or(ApiError::CommentNotFound { thread_id, comment_id })?;

    Ok(Json(DataEnvelope::new(updated.into())))
}

#[utoipa::path(
    delete,
    path = "/v1/threads/{thread_id}/comments/{comment_id}",
    params(
        ("thread_id" = i64, Path, description = "Thread ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "Thread not found, or comment not found in this thread")
    ),
    tag = "comments"
)]
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Path((thread_id, comment_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let (thread_id, comment_id) = parse_ids(&thread_id, &comment_id)?;
    let (thread, comment) = resolve_comment(state.persist.as_ref(), thread_id, comment_id).await?;

    if !state.persist.delete_comment(thread.id, comment.id).await? {
        return Err(ApiError::CommentNotFound { thread_id, comment_id });
    }
    tracing::info!(thread_id, comment_id, "Comment deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// The thread segment is checked first so a bad thread id wins over a bad
/// comment id.
fn parse_ids(thread_id: &str, comment_id: &str) -> ApiResult<(i64, i64)> {
    Ok((parse_id(thread_id)?, parse_id(comment_id)?))
}
