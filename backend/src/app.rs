//! Router assembly.
//!
//! Public routes live under `/auth`; everything under `/protected` passes
//! through `jwt_auth` first and sees the admitted `Claims` as an extension.

use crate::api::dashboard::{dashboard, me};
use crate::api::doctor::routes::doctor_router;
use crate::api::medical_history::routes::medical_history_router;
use crate::auth::middleware::jwt_auth;
use crate::auth::routes::auth_router;
use crate::state::AppState;
use axum::{Extension, Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/dashboard", get(dashboard))
        .route("/me", get(me))
        .nest("/doctors", doctor_router())
        .nest("/medical-history", medical_history_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth));

    Router::new()
        .route("/", get(root_handler))
        .nest("/auth", auth_router())
        .nest("/protected", protected)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "LifeSignal Backend",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
