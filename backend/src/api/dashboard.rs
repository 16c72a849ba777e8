//! Landing endpoint for authenticated clients.

use crate::api::common::{ApiError, service_error_to_http};
use crate::database::models::User;
use crate::state::AppState;
use crate::utils::jwt::Claims;
use axum::extract::{Extension, Json};
use serde_json::{Value, json};

#[axum::debug_handler]
pub async fn dashboard(Extension(claims): Extension<Claims>) -> Json<Value> {
    Json(json!({
        "message": "Welcome to the dashboard",
        "userId": claims.sub,
    }))
}

/// Profile of the user the token was issued to.
#[axum::debug_handler]
pub async fn me(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<User>, ApiError> {
    state
        .user_service()
        .get_user_required(claims.user_id())
        .await
        .map(Json)
        .map_err(service_error_to_http)
}
