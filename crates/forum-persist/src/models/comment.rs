use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Database-agnostic comment model
///
/// `thread_id` is fixed at creation and is never part of an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub thread_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentChanges {
    pub body: Option<String>,
}

impl CommentChanges {
    pub fn is_empty(&self) -> bool {
        self.body.is_none()
    }
}
