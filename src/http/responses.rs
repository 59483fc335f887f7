//! HTTP error mapping
//!
//! Maps domain errors onto status codes with terse bodies. Filesystem
//! detail stays in the server log and never reaches the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};

use crate::error::StorageError;

/// API-level error returned by the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Internal,
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        match &error {
            StorageError::PathTraversal(_) => {
                error!("{}", error);
                ApiError::Forbidden
            }
            StorageError::FileNotFound(_)
            | StorageError::DirectoryNotFound(_)
            | StorageError::NotADirectory(_)
            | StorageError::NotAFile(_) => {
                warn!("{}", error);
                ApiError::NotFound
            }
            StorageError::InvalidPath(_) => {
                warn!("{}", error);
                ApiError::BadRequest
            }
            StorageError::IoError(_) => {
                error!("{}", error);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, "Bad request"),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Error reading files"),
        };
        (status, message).into_response()
    }
}
