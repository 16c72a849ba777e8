//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::errors::{ServiceError, ServiceResult};
use crate::services::otp_service::OtpService;
use crate::services::user_service::{LoginIdentity, NewUser, UserService};
use crate::state::AppState;
use crate::utils::jwt::TokenService;
use std::sync::Arc;
use validator::Validate;

/// Orchestrates signup, login and OTP verification.
pub struct AuthService {
    users: UserService,
    otp: Arc<OtpService>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: UserService, otp: Arc<OtpService>, tokens: Arc<TokenService>) -> Self {
        Self { users, otp, tokens }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.user_service(),
            Arc::clone(&state.otp),
            Arc::clone(&state.tokens),
        )
    }

    /// Registers a user and returns a session token for them.
    ///
    /// The OTP is claimed atomically just before the user is written, so one
    /// code creates at most one account. If the write fails the code is put
    /// back and the signup can be retried with it.
    pub async fn register(&self, request: SignupRequest) -> ServiceResult<SignupResponse> {
        request
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        if !self.otp.check(&request.phone, &request.otp) {
            tracing::warn!("Registration failed: invalid or expired OTP for {}", request.phone);
            return Err(ServiceError::invalid_credentials("Invalid or expired OTP"));
        }

        if request.password != request.confirm_password {
            tracing::warn!("Registration failed: passwords do not match for {}", request.email);
            return Err(ServiceError::validation("Passwords do not match"));
        }

        let Some(claimed) = self.otp.consume(&request.phone, &request.otp) else {
            tracing::warn!("Registration failed: OTP for {} already spent", request.phone);
            return Err(ServiceError::invalid_credentials("Invalid or expired OTP"));
        };

        let phone = request.phone.clone();
        let created = self
            .users
            .create_user(NewUser {
                username: request.username,
                email: request.email,
                phone: request.phone,
                first_name: request.first_name,
                last_name: request.last_name,
                password: request.password,
            })
            .await;

        let user = match created {
            Ok(user) => user,
            Err(e) => {
                self.otp.restore(&phone, claimed);
                return Err(e);
            }
        };

        let token = self.tokens.issue_for(&user.id)?;

        tracing::info!("Registration successful: {}", user.id);
        Ok(SignupResponse {
            token,
            user_id: user.id,
        })
    }

    /// Authenticates by email (or phone) and password.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        request
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        let identity = match (request.email, request.phone) {
            (Some(email), _) => LoginIdentity::Email(email),
            (None, Some(phone)) => LoginIdentity::Phone(phone),
            (None, None) => {
                return Err(ServiceError::validation("email or phone is required"));
            }
        };

        let user = self
            .users
            .authenticate_user(&identity, &request.password)
            .await
            .inspect_err(|e| tracing::warn!("Login failed for {}: {}", identity.value(), e))?;

        let token = self.tokens.issue_for(&user.id)?;

        tracing::info!("Login successful: {}", user.id);
        Ok(LoginResponse {
            token,
            user_id: user.id,
        })
    }

    /// Issues a fresh OTP for the phone number.
    pub fn request_otp(&self, request: OtpRequest) -> ServiceResult<MessageResponse> {
        request
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        let code = self.otp.issue(&request.phone);
        tracing::debug!("OTP {} issued for {}", code, request.phone);
        tracing::info!("OTP sent to {}", request.phone);

        Ok(MessageResponse::new("OTP sent successfully"))
    }

    /// Checks an OTP without spending it.
    pub fn verify_otp(&self, request: VerifyOtpRequest) -> ServiceResult<MessageResponse> {
        request
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        if !self.otp.check(&request.phone, &request.otp) {
            tracing::warn!("OTP verification failed for {}", request.phone);
            return Err(ServiceError::invalid_credentials("Invalid or expired OTP"));
        }

        tracing::info!("OTP verified for {}", request.phone);
        Ok(MessageResponse::new("OTP verified successfully"))
    }
}
