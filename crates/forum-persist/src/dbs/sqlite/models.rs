use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::models::{Comment, Thread};

/// SQLite row of the `threads` table
#[derive(Debug, Clone, FromRow)]
pub struct SqliteThread {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// SQLite row of the `comments` table
#[derive(Debug, Clone, FromRow)]
pub struct SqliteComment {
    pub id: i64,
    pub thread_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Conversions between SQLite rows and database-agnostic models

impl From<SqliteThread> for Thread {
    fn from(row: SqliteThread) -> Self {
        Self {
            id: row.id,
            title: row.title,
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<SqliteComment> for Comment {
    fn from(row: SqliteComment) -> Self {
        Self {
            id: row.id,
            thread_id: row.thread_id,
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
