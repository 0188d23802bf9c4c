// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::error::{ErrorKind, WriteFailure};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(mongodb::error::Error),

    #[error("Duplicate entry")]
    DuplicateKey,

    #[error("{0} is not found!")]
    NotFound(&'static str),

    #[error("Invalid id: {0}")]
    InvalidObjectId(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Multipart error: {0}")]
    Multipart(String),

    #[error("Invalid image format")]
    InvalidImageFormat,

    #[error("Image too large")]
    ImageTooLarge,

    #[error("No image provided")]
    NoImageProvided,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Authentication failed")]
    Auth,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            AppError::DuplicateKey => (StatusCode::CONFLICT, "Duplicate entry"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            AppError::InvalidObjectId(_) => (StatusCode::BAD_REQUEST, "Invalid ID format"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation failed"),
            AppError::Multipart(_) => (StatusCode::BAD_REQUEST, "Invalid multipart data"),
            AppError::InvalidImageFormat => (StatusCode::BAD_REQUEST, "Invalid image format"),
            AppError::ImageTooLarge => (StatusCode::BAD_REQUEST, "Image too large"),
            AppError::NoImageProvided => (StatusCode::BAD_REQUEST, "No image provided"),
            AppError::Storage(_) => (StatusCode::BAD_GATEWAY, "Storage error"),
            AppError::Auth => (StatusCode::UNAUTHORIZED, "Authentication failed"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "Unauthorized access"),
            AppError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

/// The driver reports a violated unique index as server error code 11000.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            AppError::DuplicateKey
        } else {
            AppError::Database(err)
        }
    }
}

impl From<mongodb::bson::oid::Error> for AppError {
    fn from(err: mongodb::bson::oid::Error) -> Self {
        AppError::InvalidObjectId(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::Validation(format!("BSON encoding error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::Multipart(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        AppError::Auth
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
