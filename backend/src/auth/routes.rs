//! Defines the HTTP routes specifically for authentication.
//!
//! None of these sit behind the token gate.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/getOtp", post(get_otp))
        .route("/verifyOtp", post(verify_otp))
}
