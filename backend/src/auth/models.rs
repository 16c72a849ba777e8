//! Request and response payloads for the authentication endpoints.

use crate::utils::{validate_e164, validate_numeric};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 32, message = "Username must be between 3-32 characters"))]
    pub username: String,

    #[validate(email(message = "Must be a valid email"))]
    pub email: String,

    #[validate(custom(function = "validate_e164"))]
    pub phone: String,

    #[validate(length(min = 1, max = 32, message = "First name must be between 1-32 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 32, message = "Last name must be between 1-32 characters"))]
    pub last_name: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be between 8-128 characters"))]
    pub password: String,

    #[validate(length(
        min = 8,
        max = 128,
        message = "Confirm password must be between 8-128 characters"
    ))]
    pub confirm_password: String,

    #[validate(
        length(equal = 6, message = "OTP must be 6 digits"),
        custom(function = "validate_numeric")
    )]
    pub otp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Login request payload. Either `email` or `phone` identifies the user;
/// `email` wins when both are present.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Must be a valid email"))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_e164"))]
    pub phone: Option<String>,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "userID")]
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OtpRequest {
    #[validate(custom(function = "validate_e164"))]
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(custom(function = "validate_e164"))]
    pub phone: String,

    #[validate(length(equal = 6, message = "OTP must be 6 digits"))]
    pub otp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
