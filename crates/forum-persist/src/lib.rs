pub mod models;
pub mod trait_client;
pub mod dbs;
pub mod error;
pub mod builder;

pub use models::{Thread, NewThread, ThreadChanges, Comment, NewComment, CommentChanges};
pub use trait_client::PersistenceClient;
pub use dbs::sqlite::SqlitePersistenceClient;
pub use error::PersistError;
pub use builder::PersistClientBuilder;
