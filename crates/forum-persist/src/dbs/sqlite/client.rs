use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::trait_client::PersistenceClient;
use crate::models::{Comment, CommentChanges, NewComment, NewThread, Thread, ThreadChanges};
use crate::dbs::sqlite::repositories::{SqliteCommentRepository, SqliteThreadRepository};
use crate::error::{Result, PersistError};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub struct SqlitePersistenceClient {
    pool: SqlitePool,
    thread_repo: SqliteThreadRepository,
    comment_repo: SqliteCommentRepository,
}

impl SqlitePersistenceClient {
    /// Open a pool against `database_url` and optionally apply migrations
    ///
    /// An in-memory database only lives as long as its connection, so the
    /// pool is pinned to one connection that is never recycled.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        run_migrations: bool,
    ) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| PersistError::Connection(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        if run_migrations {
            MIGRATOR.run(&pool).await?;
            tracing::debug!("Database migrations applied");
        }

        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool. Migrations are the caller's responsibility.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            thread_repo: SqliteThreadRepository::new(pool.clone()),
            comment_repo: SqliteCommentRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[async_trait]
impl PersistenceClient for SqlitePersistenceClient {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_threads(&self) -> Result<Vec<Thread>> {
        let rows = self.thread_repo.list_threads().await?;
        Ok(rows.into_iter().map(Thread::from).collect())
    }

    async fn create_thread(&self, new_thread: NewThread) -> Result<Thread> {
        let row = self.thread_repo.create_thread(new_thread).await?;
        Ok(row.into())
    }

    async fn get_thread(&self, thread_id: i64) -> Result<Option<Thread>> {
        let row = self.thread_repo.get_thread(thread_id).await?;
        Ok(row.map(Thread::from))
    }

    async fn update_thread(&self, thread_id: i64, changes: ThreadChanges) -> Result<Option<Thread>> {
        let row = self.thread_repo.update_thread(thread_id, changes).await?;
        Ok(row.map(Thread::from))
    }

    async fn delete_thread(&self, thread_id: i64) -> Result<bool> {
        self.thread_repo.delete_thread(thread_id).await
    }

    async fn list_comments(&self, thread_id: i64) -> Result<Vec<Comment>> {
        let rows = self.comment_repo.list_comments(thread_id).await?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn list_comments_for_threads(&self, thread_ids: &[i64]) -> Result<Vec<Comment>> {
        let rows = self.comment_repo.list_comments_for_threads(thread_ids).await?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn create_comment(&self, thread_id: i64, new_comment: NewComment) -> Result<Comment> {
        let row = self.comment_repo.create_comment(thread_id, new_comment).await?;
        Ok(row.into())
    }

    async fn find_comment(&self, thread_id: i64, comment_id: i64) -> Result<Option<Comment>> {
        let row = self.comment_repo.find_comment(thread_id, comment_id).await?;
        Ok(row.map(Comment::from))
    }

    async fn update_comment(
        &self,
        thread_id: i64,
        comment_id: i64,
        changes: CommentChanges,
    ) -> Result<Option<Comment>> {
        let row = self
            .comment_repo
            .update_comment(thread_id, comment_id, changes)
            .await?;
        Ok(row.map(Comment::from))
    }

    async fn delete_comment(&self, thread_id: i64, comment_id: i64) -> Result<bool> {
        self.comment_repo.delete_comment(thread_id, comment_id).await
    }
}
