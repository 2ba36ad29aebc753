use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Thread not found: {0}")]
    ThreadNotFound(i64),

    #[error("Comment not found: {comment_id} in thread {thread_id}")]
    CommentNotFound { thread_id: i64, comment_id: i64 },

    /// A path segment that cannot name any resource
    #[error("Resource not found: {0}")]
    MalformedId(String),

    #[error("The given data was invalid.")]
    Validation(ValidationErrors),

    /// The request body could not be read; keeps the rejection's status
    #[error("Invalid request: {1}")]
    BodyRejected(StatusCode, String),

    #[error("Persistence error: {0}")]
    Persist(#[from] forum_persist::PersistError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ThreadNotFound(_)
            | ApiError::CommentNotFound { .. }
            | ApiError::MalformedId(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BodyRejected(status, _) => *status,
            ApiError::Persist(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::Validation(ref errors) => {
                tracing::debug!(%errors, "Validation failed");
                json!({
                    "error": self.to_string(),
                    "errors": errors,
                })
            }
            ApiError::Persist(ref e) => {
                tracing::error!("Persistence error: {}", e);
                json!({ "error": "Storage error" })
            }
            _ => {
                tracing::debug!("{}", self);
                json!({ "error": self.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
