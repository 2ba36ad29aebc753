use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

use forum_persist::{Comment, Thread};

/// Success envelope: every payload is wrapped under `data`
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Wire form of a comment. The owning thread is implied by the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CommentResource {
    pub id: i64,
    pub body: String,
}

impl From<Comment> for CommentResource {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            body: comment.body,
        }
    }
}

impl CommentResource {
    pub fn collection(comments: Vec<Comment>) -> Vec<Self> {
        comments.into_iter().map(Self::from).collect()
    }
}

/// Wire form of a thread
///
/// `comments` only appears when the caller asked for them to be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ThreadResource {
    pub id: i64,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentResource>>,
}

impl From<Thread> for ThreadResource {
    fn from(thread: Thread) -> Self {
        Self {
            id: thread.id,
            title: thread.title,
            body: thread.body,
            comments: None,
        }
    }
}

impl ThreadResource {
    pub fn with_comments(thread: Thread, comments: Vec<Comment>) -> Self {
        Self {
            comments: Some(CommentResource::collection(comments)),
            ..Self::from(thread)
        }
    }

    /// Build a list of threads. With `comments`, each thread gets the
    /// comments whose `thread_id` matches it (an empty list when none do).
    pub fn collection(threads: Vec<Thread>, comments: Option<Vec<Comment>>) -> Vec<Self> {
        let Some(comments) = comments else {
            return threads.into_iter().map(Self::from).collect();
        };

        let mut by_thread: HashMap<i64, Vec<Comment>> = HashMap::new();
        for comment in comments {
            by_thread.entry(comment.thread_id).or_default().push(comment);
        }

        threads
            .into_iter()
            .map(|thread| {
                let owned = by_thread.remove(&thread.id).unwrap_or_default();
                Self::with_comments(thread, owned)
            })
            .collect()
    }
}
