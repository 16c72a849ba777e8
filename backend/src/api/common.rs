//! Error handling utilities for API responses.
//!
//! Every failure leaves the service as JSON:
//! - `error`: human-readable message
//! - `error_type`: machine-readable category
//! - `details`: optional extra context (token rejections only)
//!
//! Storage and internal failures are logged here and replaced with a generic
//! message, so driver errors never reach the client.

use crate::errors::ServiceError;
use axum::{Json, extract::rejection::JsonRejection, http::StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(
        error: impl Into<String>,
        error_type: impl Into<String>,
        details: Option<String>,
    ) -> Self {
        Self {
            error: error.into(),
            error_type: error_type.into(),
            details,
        }
    }
}

/// Error half of every handler's return type.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, error_type: &str, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(message, error_type, None)))
}

/// Malformed or mistyped JSON bodies are plain 400s.
pub fn json_rejection_to_http(rejection: JsonRejection) -> ApiError {
    tracing::warn!("Invalid request body: {}", rejection.body_text());
    error_response(StatusCode::BAD_REQUEST, "invalid_request", rejection.body_text())
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> ApiError {
    let (status, error_type, message) = match error {
        ServiceError::Validation { message } => {
            (StatusCode::BAD_REQUEST, "validation_error", message)
        }
        ServiceError::InvalidCredentials { message } => {
            (StatusCode::BAD_REQUEST, "authentication_error", message)
        }
        ServiceError::NotFound { entity, identifier } => {
            tracing::debug!("{} '{}' not found", entity, identifier);
            (StatusCode::NOT_FOUND, "not_found", format!("{} not found", entity))
        }
        ServiceError::AlreadyExists { entity, identifier } => {
            tracing::debug!("{} '{}' already exists", entity, identifier);
            (
                StatusCode::CONFLICT,
                "already_exists",
                format!("{} already exists", entity),
            )
        }
        ServiceError::Storage { source } => {
            tracing::error!("Storage error: {:#}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                "Internal server error".to_string(),
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            )
        }
    };

    error_response(status, error_type, message)
}
