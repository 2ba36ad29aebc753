use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::dbs::sqlite::models::SqliteComment;
use crate::models::{CommentChanges, NewComment};
use crate::error::Result;

const COMMENT_COLUMNS: &str = "id, thread_id, body, created_at, updated_at";

/// SQLite caps the number of bound parameters in one statement
const MAX_IDS_PER_QUERY: usize = 500;

/// Comment queries. Every statement that targets a single comment filters
/// on `thread_id` as well as `id`.
#[derive(Clone)]
pub struct SqliteCommentRepository {
    pool: SqlitePool,
}

impl SqliteCommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all comments for a thread
    pub async fn list_comments(&self, thread_id: i64) -> Result<Vec<SqliteComment>> {
        let comments = sqlx::query_as::<_, SqliteComment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE thread_id = ? ORDER BY id"
        ))
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    /// Get the comments of several threads at once, ordered by id
    pub async fn list_comments_for_threads(&self, thread_ids: &[i64]) -> Result<Vec<SqliteComment>> {
        let mut comments = Vec::new();

        for chunk in thread_ids.chunks(MAX_IDS_PER_QUERY) {
            let mut query = QueryBuilder::<Sqlite>::new(format!(
                "SELECT {COMMENT_COLUMNS} FROM comments WHERE thread_id IN ("
            ));
            let mut ids = query.separated(", ");
            for thread_id in chunk {
                ids.push_bind(*thread_id);
            }
            ids.push_unseparated(")");

            let batch = query
                .build_query_as::<SqliteComment>()
                .fetch_all(&self.pool)
                .await?;
            comments.extend(batch);
        }

        comments.sort_by_key(|comment| comment.id);
        tracing::debug!(threads = thread_ids.len(), comments = comments.len(), "Loaded comments for threads");
        Ok(comments)
    }

    /// Save a new comment under `thread_id`
    pub async fn create_comment(
        &self,
        thread_id: i64,
        new_comment: NewComment,
    ) -> Result<SqliteComment> {
        let now = Utc::now();
        let comment = sqlx::query_as::<_, SqliteComment>(&format!(
            "INSERT INTO comments (thread_id, body, created_at, updated_at) \
             VALUES (?, ?, ?, ?) RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(thread_id)
        .bind(new_comment.body)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(thread_id, comment_id = comment.id, "Comment created");
        Ok(comment)
    }

    pub async fn find_comment(
        &self,
        thread_id: i64,
        comment_id: i64,
    ) -> Result<Option<SqliteComment>> {
        let comment = sqlx::query_as::<_, SqliteComment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ? AND thread_id = ?"
        ))
        .bind(comment_id)
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    pub async fn update_comment(
        &self,
        thread_id: i64,
        comment_id: i64,
        changes: CommentChanges,
    ) -> Result<Option<SqliteComment>> {
        if changes.is_empty() {
            return self.find_comment(thread_id, comment_id).await;
        }

        let comment = sqlx::query_as::<_, SqliteComment>(&format!(
            "UPDATE comments SET body = COALESCE(?, body), updated_at = ? \
             WHERE id = ? AND thread_id = ? RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(changes.body)
        .bind(Utc::now())
        .bind(comment_id)
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    pub async fn delete_comment(&self, thread_id: i64, comment_id: i64) -> Result<bool> {
        let removed = sqlx::query("DELETE FROM comments WHERE id = ? AND thread_id = ?")
            .bind(comment_id)
            .bind(thread_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if removed > 0 {
            tracing::debug!(thread_id, comment_id, "Comment deleted");
        }
        Ok(removed > 0)
    }
}
