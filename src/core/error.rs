use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Internal(String),
}

/// Default status mapping, used by handlers that propagate with `?`.
///
/// Several endpoints deliberately do NOT use this: the category
/// list/create/delete handlers flatten every error to HTTP 200 and the
/// doctor/hospital handlers to HTTP 500, matching the shipped API. Those
/// handlers match on the service Result themselves.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Storage(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // The raw message goes to the caller: the API exposes human-readable
        // errors, not opaque codes.
        let body = Json(ApiResponse::<()>::failure(self.to_string()));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
