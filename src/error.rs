//! Error types for the Local Library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error codes reported in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 3,
    NoSuchAuthor = 5,
    InvalidIdentifier = 18,
    NotImplemented = 22,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A path or form identifier that is not a well-formed store id
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The store could not be reached or rejected the query
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not implemented: {0}")]
    Unimplemented(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and error code for this error.
    ///
    /// Malformed identifiers are reported as 404 like a missing record; the
    /// error code still tells the two apart.
    pub fn classify(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::InvalidInput(_) => (StatusCode::NOT_FOUND, ErrorCode::InvalidIdentifier),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchAuthor),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DbFailure),
            AppError::Unimplemented(_) => (StatusCode::NOT_IMPLEMENTED, ErrorCode::NotImplemented),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure),
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();

        let message = match &self {
            AppError::InvalidInput(msg)
            | AppError::NotFound(msg)
            | AppError::Unimplemented(msg) => msg.clone(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_identifier_and_missing_record_share_status() {
        let (invalid, invalid_code) = AppError::InvalidInput("x".into()).classify();
        let (missing, missing_code) = AppError::NotFound("x".into()).classify();
        assert_eq!(invalid, StatusCode::NOT_FOUND);
        assert_eq!(missing, StatusCode::NOT_FOUND);
        assert_ne!(invalid_code, missing_code);
    }

    #[test]
    fn unimplemented_maps_to_501() {
        let response = AppError::Unimplemented("Author update GET".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }
}
