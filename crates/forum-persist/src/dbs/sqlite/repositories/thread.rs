use chrono::Utc;
use sqlx::SqlitePool;

use crate::dbs::sqlite::models::SqliteThread;
use crate::models::{NewThread, ThreadChanges};
use crate::error::Result;

const THREAD_COLUMNS: &str = "id, title, body, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteThreadRepository {
    pool: SqlitePool,
}

impl SqliteThreadRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all threads
    pub async fn list_threads(&self) -> Result<Vec<SqliteThread>> {
        let threads = sqlx::query_as::<_, SqliteThread>(&format!(
            "SELECT {THREAD_COLUMNS} FROM threads ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(threads)
    }

    /// Create a new thread
    pub async fn create_thread(&self, new_thread: NewThread) -> Result<SqliteThread> {
        let now = Utc::now();
        let thread = sqlx::query_as::<_, SqliteThread>(&format!(
            "INSERT INTO threads (title, body, created_at, updated_at) \
             VALUES (?, ?, ?, ?) RETURNING {THREAD_COLUMNS}"
        ))
        .bind(new_thread.title)
        .bind(new_thread.body)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(thread_id = thread.id, "Thread created");
        Ok(thread)
    }

    /// Get thread by ID
    pub async fn get_thread(&self, thread_id: i64) -> Result<Option<SqliteThread>> {
        let thread = sqlx::query_as::<_, SqliteThread>(&format!(
            "SELECT {THREAD_COLUMNS} FROM threads WHERE id = ?"
        ))
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(thread)
    }

    /// Update the supplied fields of a thread
    pub async fn update_thread(
        &self,
        thread_id: i64,
        changes: ThreadChanges,
    ) -> Result<Option<SqliteThread>> {
        // Nothing to write: leave updated_at alone.
        if changes.is_empty() {
            return self.get_thread(thread_id).await;
        }

        let thread = sqlx::query_as::<_, SqliteThread>(&format!(
            "UPDATE threads \
             SET title = COALESCE(?, title), body = COALESCE(?, body), updated_at = ? \
             WHERE id = ? RETURNING {THREAD_COLUMNS}"
        ))
        .bind(changes.title)
        .bind(changes.body)
        .bind(Utc::now())
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(thread)
    }

    /// Delete a thread together with its comments in a single transaction
    pub async fn delete_thread(&self, thread_id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let comments_removed = sqlx::query("DELETE FROM comments WHERE thread_id = ?")
            .bind(thread_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let threads_removed = sqlx::query("DELETE FROM threads WHERE id = ?")
            .bind(thread_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        if threads_removed > 0 {
            tracing::debug!(thread_id, comments_removed, "Thread deleted");
        }
        Ok(threads_removed > 0)
    }
}
