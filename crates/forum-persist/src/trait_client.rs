use async_trait::async_trait;
use crate::models::{Comment, CommentChanges, NewComment, NewThread, Thread, ThreadChanges};
use crate::error::Result;

/// Trait for database persistence operations
///
/// Implementations provide database-specific CRUD operations. Comments are
/// always addressed through their owning thread: every comment lookup takes
/// both the thread id and the comment id, and a comment stored under another
/// thread is reported as absent.
#[async_trait]
pub trait PersistenceClient: Send + Sync {
    /// Check that the database answers
    async fn ping(&self) -> Result<()>;

    /// List all threads in insertion order
    async fn list_threads(&self) -> Result<Vec<Thread>>;

    /// Create a new thread
    async fn create_thread(&self, new_thread: NewThread) -> Result<Thread>;

    /// Get a thread by ID
    async fn get_thread(&self, thread_id: i64) -> Result<Option<Thread>>;

    /// Apply the supplied fields to a thread. Returns `None` if it does not exist.
    async fn update_thread(&self, thread_id: i64, changes: ThreadChanges) -> Result<Option<Thread>>;

    /// Delete a thread and all of its comments atomically.
    /// Returns `false` if the thread did not exist.
    async fn delete_thread(&self, thread_id: i64) -> Result<bool>;

    /// Get all comments for a thread
    async fn list_comments(&self, thread_id: i64) -> Result<Vec<Comment>>;

    /// Get the comments of several threads in one round trip (eager loading)
    async fn list_comments_for_threads(&self, thread_ids: &[i64]) -> Result<Vec<Comment>>;

    /// Create a comment owned by `thread_id`
    async fn create_comment(&self, thread_id: i64, new_comment: NewComment) -> Result<Comment>;

    /// Find a comment matching both its own ID and its thread ID
    async fn find_comment(&self, thread_id: i64, comment_id: i64) -> Result<Option<Comment>>;

    /// Apply the supplied fields to a comment within its thread
    async fn update_comment(
        &self,
        thread_id: i64,
        comment_id: i64,
        changes: CommentChanges,
    ) -> Result<Option<Comment>>;

    /// Delete a comment within its thread. Returns `false` if no such comment.
    async fn delete_comment(&self, thread_id: i64, comment_id: i64) -> Result<bool>;
}
