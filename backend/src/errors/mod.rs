//! Global application error types.
//!
//! Component-level failures (hashing, tokens) have their own enums next to the
//! component; they convert into `ServiceError`, which is what handlers map to
//! HTTP responses.

use thiserror::Error;

use crate::utils::jwt::TokenError;
use crate::utils::password::HashError;

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("{entity} already exists: {identifier}")]
    AlreadyExists { entity: String, identifier: String },

    #[error("Storage error: {source}")]
    Storage {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Flattens `validator` output into a single `field: message` list.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| error.code.to_string())
                    )
                })
            })
            .collect();
        messages.sort();
        Self::validation(messages.join(", "))
    }
}

impl From<HashError> for ServiceError {
    fn from(error: HashError) -> Self {
        Self::internal_error(format!("Password hashing failed: {}", error))
    }
}

impl From<TokenError> for ServiceError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Signing(_) => {
                Self::internal_error(format!("Token generation failed: {}", error))
            }
            TokenError::Invalid(_) | TokenError::Expired => {
                Self::invalid_credentials(error.to_string())
            }
        }
    }
}
