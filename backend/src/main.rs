//! Main entry point for the LifeSignal backend.
//!
//! Loads configuration, opens the database, starts the OTP purge task and
//! serves the router until Ctrl-C.

mod api;
mod app;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod state;
mod utils;

use anyhow::Context;
use config::Config;
use database::Database;
use state::AppState;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    let state = AppState::new(config.clone(), db.pool().clone());

    spawn_otp_purge(&state, Duration::from_secs(config.otp_purge_interval_seconds));

    let app = app::build_router(state);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Starting LifeSignal server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    Ok(())
}

/// Drops expired OTPs on a fixed period so unused codes do not pile up.
fn spawn_otp_purge(state: &AppState, period: Duration) {
    let otp = state.otp.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let purged = otp.purge_expired();
            if purged > 0 {
                tracing::debug!("Purged {} expired OTPs", purged);
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
