use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use roster_shared::{error::StoreError, models::ErrorResponse};
use thiserror::Error;

use crate::validation::Violation;

#[derive(Error, Debug)]
pub enum AppError {
    /// The requested user does not exist
    #[error("{0}")]
    NotFound(String),

    /// A business rule rejected the request
    #[error("{0}")]
    InvalidArgument(String),

    /// Request shape checks failed before the service was reached
    #[error("Validation failed: {}", first_message(.0))]
    ValidationFailed(Vec<Violation>),

    /// The request could not be parsed
    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

fn first_message(violations: &[Violation]) -> &str {
    violations
        .first()
        .map(|violation| violation.message.as_str())
        .unwrap_or("Validation failed")
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => {
                AppError::InvalidArgument(format!("Email already exists: {}", email))
            }
            StoreError::InternalError(msg) => AppError::Internal(msg),
        }
    }
}

/// Renders a status as `"404 NOT_FOUND"`
pub fn status_label(status: StatusCode) -> String {
    let reason = status
        .canonical_reason()
        .unwrap_or("Unknown")
        .to_uppercase()
        .replace([' ', '-'], "_");
    format!("{} {}", status.as_u16(), reason)
}

/// Builds the JSON error body shared by every failure response
pub fn error_response(status: StatusCode, label: &str, message: impl Into<String>) -> Response {
    let body = ErrorResponse::new(label, status_label(status), message);
    (status, Json(body)).into_response()
}

// Error handler for our API
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, label, message) = match self {
            AppError::NotFound(msg) => {
                warn!("Not found error: {}", msg);
                (StatusCode::NOT_FOUND, "User not found", msg)
            }
            AppError::InvalidArgument(msg) => {
                warn!("Invalid argument: {}", msg);
                (StatusCode::BAD_REQUEST, "Bad request", msg)
            }
            AppError::ValidationFailed(violations) => {
                warn!("Validation failed: {:?}", violations);
                let msg = first_message(&violations).to_string();
                (StatusCode::BAD_REQUEST, "Validation failed", msg)
            }
            AppError::BadRequest(msg) => {
                warn!("Bad request error: {}", msg);
                (StatusCode::BAD_REQUEST, "Bad request", msg)
            }
            AppError::Internal(msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "Internal server error".to_string(),
                )
            }
        };

        error_response(status, label, message)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
