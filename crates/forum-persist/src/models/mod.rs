mod comment;
mod thread;

// Export database-agnostic models
pub use comment::{Comment, CommentChanges, NewComment};
pub use thread::{NewThread, Thread, ThreadChanges};
