//! Central module for application-wide configuration settings.
//!
//! Everything is read once at startup from the environment (and an optional
//! `.env` file). Required values fail fast; the rest fall back to defaults.

use anyhow::{Context, Result, bail};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Upper bound for every `*_SECONDS` setting (ten years). Larger values would
/// overflow date arithmetic on tokens and OTP records.
pub const MAX_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub storage_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub jwt_leeway_seconds: u64,
    pub otp_expiry_seconds: u64,
    pub otp_purge_interval_seconds: u64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;
        if database_url.trim().is_empty() {
            bail!("DATABASE_URL must not be empty");
        }

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let bcrypt_cost = parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31");
        }

        let otp_purge_interval_seconds = parse_seconds("OTP_PURGE_INTERVAL_SECONDS", 60)?;
        if otp_purge_interval_seconds == 0 {
            bail!("OTP_PURGE_INTERVAL_SECONDS must be positive");
        }

        Ok(Config {
            database_url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,
            acquire_timeout_seconds: parse_seconds("DB_ACQUIRE_TIMEOUT_SECONDS", 3)?,
            storage_timeout_seconds: parse_seconds("STORAGE_TIMEOUT_SECONDS", 5)?,
            jwt_secret,
            jwt_expires_in_seconds: parse_seconds("JWT_EXPIRES_IN_SECONDS", 86_400)?,
            jwt_leeway_seconds: parse_seconds("JWT_LEEWAY_SECONDS", 0)?,
            otp_expiry_seconds: parse_seconds("OTP_EXPIRY_SECONDS", 300)?,
            otp_purge_interval_seconds,
            bcrypt_cost,
            server_port: parse_or("SERVER_PORT", 3000)?,
        })
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_secs(self.storage_timeout_seconds)
    }

    pub fn otp_expiry(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.otp_expiry_seconds as i64)
    }
}

/// Reads `key` and parses it, using `default` when the variable is unset.
fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number")),
        Err(_) => Ok(default),
    }
}

/// Like `parse_or`, for durations in seconds capped at `MAX_SECONDS`.
fn parse_seconds(key: &str, default: u64) -> Result<u64> {
    let seconds = parse_or(key, default)?;
    if seconds > MAX_SECONDS {
        bail!("{key} must be at most {MAX_SECONDS} seconds");
    }
    Ok(seconds)
}

#[cfg(test)]
impl Config {
    /// Configuration used by unit and router tests.
    pub fn for_tests() -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            storage_timeout_seconds: 5,
            jwt_secret: "test-secret-key".to_string(),
            jwt_expires_in_seconds: 3600,
            jwt_leeway_seconds: 0,
            otp_expiry_seconds: 300,
            otp_purge_interval_seconds: 60,
            bcrypt_cost: 4,
            server_port: 0,
        }
    }
}
