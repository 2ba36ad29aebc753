use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Database-agnostic thread model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThread {
    pub title: String,
    pub body: String,
}

/// Partial update of a thread. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadChanges {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl ThreadChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }
}
