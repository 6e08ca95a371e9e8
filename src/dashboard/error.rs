use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::utils::errors::GroupWardenError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (
            status,
            Json(serde_json::json!({ "success": false, "error": error_message })),
        )
            .into_response()
    }
}

impl From<GroupWardenError> for ApiError {
    fn from(err: GroupWardenError) -> Self {
        match err {
            GroupWardenError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            GroupWardenError::CommandExists(name) => {
                ApiError::InvalidInput(format!("Command '{name}' already exists"))
            }
            GroupWardenError::CommandNotFound(id) => ApiError::NotFound(format!("Command {id} not found")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
