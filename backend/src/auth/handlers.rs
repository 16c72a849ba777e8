//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse request bodies, hand them to `AuthService` and map
//! the outcome to HTTP.

use crate::api::common::{ApiError, error_response, json_rejection_to_http, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::errors::ServiceError;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::StatusCode,
};

/// Handle user signup request
#[axum::debug_handler]
pub async fn signup(
    Extension(state): Extension<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<SignupResponse>, ApiError> {
    let Json(payload) = payload.map_err(json_rejection_to_http)?;

    AuthService::from_state(&state)
        .register(payload)
        .await
        .map(Json)
        .map_err(service_error_to_http)
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(state): Extension<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(payload) = payload.map_err(json_rejection_to_http)?;

    AuthService::from_state(&state)
        .login(payload)
        .await
        .map(Json)
        .map_err(|error| match error {
            // Login never reveals a 404; an unknown account is a bad request.
            ServiceError::NotFound { .. } => error_response(
                StatusCode::BAD_REQUEST,
                "authentication_error",
                "No user found",
            ),
            other => service_error_to_http(other),
        })
}

/// Handle OTP issuance request
#[axum::debug_handler]
pub async fn get_otp(
    Extension(state): Extension<AppState>,
    payload: Result<Json<OtpRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(payload) = payload.map_err(json_rejection_to_http)?;

    AuthService::from_state(&state)
        .request_otp(payload)
        .map(Json)
        .map_err(service_error_to_http)
}

/// Handle OTP verification request
#[axum::debug_handler]
pub async fn verify_otp(
    Extension(state): Extension<AppState>,
    payload: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(payload) = payload.map_err(json_rejection_to_http)?;

    AuthService::from_state(&state)
        .verify_otp(payload)
        .map(Json)
        .map_err(service_error_to_http)
}
