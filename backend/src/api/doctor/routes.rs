//! Routes for the doctor directory. Mounted behind the auth gate.

use super::handlers::{generate_random_doctor, get_all_doctors};
use axum::{
    Router,
    routing::{get, post},
};

pub fn doctor_router() -> Router {
    Router::new()
        .route("/", get(get_all_doctors))
        .route("/generate", post(generate_random_doctor))
}
