//! Error types for Bookshelf server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes exposed in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    Duplicate = 8,
    BadValue = 18,
    RequiredFieldMissing = 30,
    DuplicateKey = 31,
    EntityNotFound = 32,
    SummaryGenerationFailed = 33,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Required field missing: {0}")]
    RequiredFieldMissing(String),

    #[error("A book with ISBN {0} already exists")]
    DuplicateKey(String),

    #[error("{resource} with id {id} not found")]
    EntityNotFound { resource: String, id: String },

    #[error("Failed to generate book summary")]
    SummaryGenerationFailed,

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        AppError::EntityNotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    fn parts(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::RequiredFieldMissing(_) => (StatusCode::BAD_REQUEST, ErrorCode::RequiredFieldMissing),
            AppError::DuplicateKey(_) => (StatusCode::CONFLICT, ErrorCode::DuplicateKey),
            AppError::EntityNotFound { .. } => (StatusCode::NOT_FOUND, ErrorCode::EntityNotFound),
            AppError::SummaryGenerationFailed => (StatusCode::BAD_GATEWAY, ErrorCode::SummaryGenerationFailed),
            AppError::Authentication(_) => (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::Conflict(_) => (StatusCode::CONFLICT, ErrorCode::Duplicate),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DbFailure),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
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
        let (status, code) = self.parts();

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
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
