//! Handler functions for the doctor directory.

use crate::api::common::{ApiError, service_error_to_http};
use crate::database::models::Doctor;
use crate::services::doctor_service::DoctorService;
use crate::state::AppState;
use axum::extract::{Extension, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DoctorCreatedResponse {
    pub message: String,
    pub doctor: Doctor,
}

#[derive(Debug, Serialize)]
pub struct DoctorListResponse {
    pub doctors: Vec<Doctor>,
}

/// Generates and stores a random doctor profile.
#[axum::debug_handler]
pub async fn generate_random_doctor(
    Extension(state): Extension<AppState>,
) -> Result<Json<DoctorCreatedResponse>, ApiError> {
    let doctor = DoctorService::new(&state.pool, state.config.storage_timeout())
        .generate_doctor()
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(DoctorCreatedResponse {
        message: "Doctor added successfully".to_string(),
        doctor,
    }))
}

#[axum::debug_handler]
pub async fn get_all_doctors(
    Extension(state): Extension<AppState>,
) -> Result<Json<DoctorListResponse>, ApiError> {
    let doctors = DoctorService::new(&state.pool, state.config.storage_timeout())
        .list_doctors()
        .await
        .map_err(service_error_to_http)?;

    tracing::info!("Doctors retrieved: {}", doctors.len());
    Ok(Json(DoctorListResponse { doctors }))
}
