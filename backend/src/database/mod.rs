//! Module for database connection setup.
//!
//! The pool is built once at startup and handed to every component that needs
//! storage; nothing looks it up globally.

use crate::config::Config;
use anyhow::{Context, Result};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::time::Duration;

pub mod models;

#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    /// Initializes the connection pool and applies pending migrations.
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(&config.database_url)
            .await
            .with_context(|| format!("failed to connect to {}", config.database_url))?;

        let database = Database { pool };
        database.migrate().await?;
        Ok(database)
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .context("failed to run database migrations")
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}

/// Single-connection in-memory database with the schema applied.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let database = Database::new(&Config::for_tests())
        .await
        .expect("in-memory database");
    database.pool
}
