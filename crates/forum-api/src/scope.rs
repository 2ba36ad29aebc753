//! Path-to-entity resolution
//!
//! Comments are reachable only through their thread: the parent is resolved
//! first, then the comment is looked up by its id *and* the parent's id. A
//! comment that lives under a different thread is indistinguishable from one
//! that does not exist.

use forum_persist::{Comment, PersistenceClient, Thread};

use crate::error::{ApiError, ApiResult};

/// Parse a path segment as a resource id
///
/// Anything that is not a positive integer cannot name a row, so it is
/// reported as not found rather than as a bad request.
pub fn parse_id(segment: &str) -> ApiResult<i64> {
    segment
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::MalformedId(segment.to_string()))
}

pub async fn resolve_thread(persist: &dyn PersistenceClient, thread_id: i64) -> ApiResult<Thread> {
    persist
        .get_thread(thread_id)
        .await?
        .ok_or(ApiError::ThreadNotFound(thread_id))
}

pub async fn resolve_comment(
    persist: &dyn PersistenceClient,
    thread_id: i64,
    comment_id: i64,
) -> ApiResult<(Thread, Comment)> {
    let thread = resolve_thread(persist, thread_id).await?;

    let comment = persist
        .find_comment(thread.id, comment_id)
        .await?
        .ok_or(ApiError::CommentNotFound { thread_id, comment_id })?;

    Ok((thread, comment))
}
