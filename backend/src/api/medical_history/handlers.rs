//! Handler functions for per-user medical histories.

use crate::api::common::{ApiError, service_error_to_http};
use crate::database::models::MedicalHistory;
use crate::services::medical_history_service::MedicalHistoryService;
use crate::state::AppState;
use axum::extract::{Extension, Json, Path};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MedicalHistoryCreatedResponse {
    pub message: String,
    pub medical_history: MedicalHistory,
}

#[derive(Debug, Serialize)]
pub struct MedicalHistoryResponse {
    pub medical_history: MedicalHistory,
}

/// Generates and stores a random history for the user in the path.
#[axum::debug_handler]
pub async fn generate_user_medical_history(
    Extension(state): Extension<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<MedicalHistoryCreatedResponse>, ApiError> {
    let medical_history = MedicalHistoryService::new(&state.pool, state.config.storage_timeout())
        .generate_history(&user_id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(MedicalHistoryCreatedResponse {
        message: "Medical history added successfully".to_string(),
        medical_history,
    }))
}

#[axum::debug_handler]
pub async fn get_user_medical_history(
    Extension(state): Extension<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<MedicalHistoryResponse>, ApiError> {
    let medical_history = MedicalHistoryService::new(&state.pool, state.config.storage_timeout())
        .get_history(&user_id)
        .await
        .map_err(service_error_to_http)?;

    tracing::info!("Medical history retrieved for user: {}", user_id);
    Ok(Json(MedicalHistoryResponse { medical_history }))
}
