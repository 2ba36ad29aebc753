use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use forum_persist::{NewThread, Thread, ThreadChanges};
use crate::{
    error::{ApiError, ApiResult},
    extract::JsonPayload,
    resources::{DataEnvelope, ThreadResource},
    scope::{parse_id, resolve_thread},
    state::AppState,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IncludeQuery {
    /// Comma separated relations to eager load; only `comments` is known
    pub include: Option<String>,
}

impl IncludeQuery {
    pub fn wants_comments(&self) -> bool {
        self.include
            .as_deref()
            .map(|include| include.split(',').any(|rel| rel.trim() == "comments"))
            .unwrap_or(false)
    }
}

/// List all threads
#[utoipa::path(
    get,
    path = "/v1/threads",
    params(IncludeQuery),
    responses(
        (status = 200, description = "All threads under `data`", body = [ThreadResource])
    ),
    tag = "threads"
)]
pub async fn list_threads(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IncludeQuery>,
) -> ApiResult<Json<DataEnvelope<Vec<ThreadResource>>>> {
    let threads = state.persist.list_threads().await?;

    let comments = if query.wants_comments() {
        let ids: Vec<i64> = threads.iter().map(|t| t.id).collect();
        Some(state.persist.list_comments_for_threads(&ids).await?)
    } else {
        None
    };

    Ok(Json(DataEnvelope::new(ThreadResource::collection(threads, comments))))
}

/// Create a new thread
#[utoipa::path(
    post,
    path = "/v1/threads",
    responses(
        (status = 201, description = "Thread created", body = ThreadResource),
        (status = 422, description = "Missing or invalid title/body")
    ),
    tag = "threads"
)]
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    payload: JsonPayload,
) -> ApiResult<(StatusCode, Json<DataEnvelope<ThreadResource>>)> {
    let new_thread: NewThread = payload.validated()?;

    let thread = state.persist.create_thread(new_thread).await?;
    tracing::info!(thread_id = thread.id, "Thread created");

    Ok((StatusCode::CREATED, Json(DataEnvelope::new(thread.into()))))
}

/// Get a specific thread by ID
#[utoipa::path(
    get,
    path = "/v1/threads/{thread_id}",
    params(
        ("thread_id" = i64, Path, description = "Thread ID"),
        IncludeQuery
    ),
    responses(
        (status = 200, description = "Thread details", body = ThreadResource),
        (status = 404, description = "Thread not found")
    ),
    tag = "threads"
)]
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
    Query(query): Query<IncludeQuery>,
) -> ApiResult<Json<DataEnvelope<ThreadResource>>> {
    let thread = resolve_thread(state.persist.as_ref(), parse_id(&thread_id)?).await?;
    let resource = thread_resource(&state, thread, &query).await?;

    Ok(Json(DataEnvelope::new(resource)))
}

/// Update a thread (partial: omitted fields keep their values)
#[utoipa::path(
    put,
    path = "/v1/threads/{thread_id}",
    params(
        ("thread_id" = i64, Path, description = "Thread ID")
    ),
    responses(
        (status = 200, description = "Updated thread", body = ThreadResource),
        (status = 404, description = "Thread not found"),
        (status = 422, description = "A supplied field is not a string")
    ),
    tag = "threads"
)]
pub async fn update_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
    payload: JsonPayload,
) -> ApiResult<Json<DataEnvelope<ThreadResource>>> {
    let thread = resolve_thread(state.persist.as_ref(), parse_id(&thread_id)?).await?;
    let changes: ThreadChanges = payload.validated()?;

    let updated = state
        .persist
        .update_thread(thread.id, changes)
        .await?
        .ok_or(ApiError::ThreadNotFound(thread.id))?;

    Ok(Json(DataEnvelope::new(updated.into())))
}

/// Delete a thread and all of its comments
#[utoipa::path(
    delete,
    path = "/v1/threads/{thread_id}",
    params(
        ("thread_id" = i64, Path, description = "Thread ID")
    ),
    responses(
        (status = 204, description = "Thread deleted"),
        (status = 404, description = "Thread not found")
    ),
    tag = "threads"
)]
pub async fn delete_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<StatusCode> {
    let thread = resolve_thread(state.persist.as_ref(), parse_id(&thread_id)?).await?;

    if !state.persist.delete_thread(thread.id).await? {
        return Err(ApiError::ThreadNotFound(thread.id));
    }
    tracing::info!(thread_id = thread.id, "Thread deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn thread_resource(
    state: &AppState,
    thread: Thread,
    query: &IncludeQuery,
) -> ApiResult<ThreadResource> {
    if query.wants_comments() {
        let comments = state.persist.list_comments(thread.id).await?;
        Ok(ThreadResource::with_comments(thread, comments))
    } else {
        Ok(thread.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_query() {
        let query = IncludeQuery { include: Some("author, comments".to_string()) };
        assert!(query.wants_comments());

        let query = IncludeQuery { include: Some("author".to_string()) };
        assert!(!query.wants_comments());

        assert!(!IncludeQuery::default().wants_comments());
    }
}
