//! Routes for medical histories. Mounted behind the auth gate.

use super::handlers::{generate_user_medical_history, get_user_medical_history};
use axum::{
    Router,
    routing::{get, post},
};

pub fn medical_history_router() -> Router {
    Router::new()
        .route("/{userid}", get(get_user_medical_history))
        .route("/{userid}/generate", post(generate_user_medical_history))
}
