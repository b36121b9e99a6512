//! Error types for the booking server

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::availability::Rejection;

/// Stable numeric error codes returned to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    StorageUnavailable = 2,
    NoSuchBooking = 3,
    BadValue = 4,
    UnknownEquipment = 5,
    CapacityConflict = 6,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Booking rejected: {0}")]
    Rejected(Rejection),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message suitable for showing to the person filling in the form
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Rejected(rejection) => rejection.to_string(),
            AppError::Database(_) => "storage unavailable, please try again later".to_string(),
            AppError::Config(_) | AppError::Internal(_) => "internal server error".to_string(),
        }
    }

    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchBooking),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::Rejected(Rejection::InsufficientEquipment) => {
                (StatusCode::CONFLICT, ErrorCode::CapacityConflict)
            }
            AppError::Rejected(Rejection::UnknownEquipment) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::UnknownEquipment)
            }
            AppError::Rejected(Rejection::NonPositiveQuantity) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::BadValue)
            }
            AppError::Database(e) if is_unavailable(e) => {
                (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::StorageUnavailable)
            }
            AppError::Database(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::StorageUnavailable)
            }
            AppError::Config(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure)
            }
        }
    }
}

fn is_unavailable(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Configuration(_)
    )
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
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Config(msg) | AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg)
            }
            _ => {}
        }

        let (status, code) = self.status_and_code();
        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message: self.user_message(),
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
