pub mod comment;
pub mod thread;

pub use comment::SqliteCommentRepository;
pub use thread::SqliteThreadRepository;
