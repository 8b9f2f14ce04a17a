use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use redis::RedisError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Invalid embedding: {0}")]
    InvalidEmbedding(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    /// The store answered with a shape this crate does not understand
    #[error("Malformed store reply: {0}")]
    MalformedReply(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            ItemError::InvalidEmbedding(msg) => {
                AppError::BadRequest(format!("Invalid embedding: {}", msg))
            }
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::Store(msg) => AppError::Store(msg),
            ItemError::MalformedReply(msg) => AppError::Store(format!("malformed reply: {}", msg)),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<RedisError> for ItemError {
    fn from(err: RedisError) -> Self {
        ItemError::Store(err.to_string())
    }
}
