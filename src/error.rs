use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("resource not found")]
    NotFound,

    #[error("missing or invalid identity")]
    Unauthorized,

    #[error("access denied")]
    Forbidden,

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": {
                        "message": "Validation failed",
                        "fields": errors.errors,
                    }
                }),
            ),
            AppError::Conflict(message) => (
                StatusCode::CONFLICT,
                json!({ "error": { "message": message } }),
            ),
            // "does not exist" and "not owned by the caller" answer
            // identically so record ids leak nothing across students.
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": { "message": "Resource not found" } }),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": { "message": "Authentication required" } }),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({ "error": { "message": "Access denied" } }),
            ),
            AppError::Storage(err) => {
                tracing::error!("storage failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": { "message": "An internal error occurred" } }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
