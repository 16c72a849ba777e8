//! Shared application state handed to every handler.

use crate::config::Config;
use crate::repositories::otp_repository::{InMemoryOtpStore, OtpStore};
use crate::repositories::user_repository::{UserRepository, UserStore};
use crate::services::otp_service::OtpService;
use crate::services::user_service::UserService;
use crate::utils::jwt::TokenService;
use crate::utils::password::PasswordHasher;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    pub tokens: Arc<TokenService>,
    pub otp: Arc<OtpService>,
    pub users: Arc<dyn UserStore>,
    pub hasher: PasswordHasher,
}

impl AppState {
    /// Wires the default collaborators: SQLite user store and in-memory OTP store.
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let otp_store: Arc<dyn OtpStore> = Arc::new(InMemoryOtpStore::new());
        let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(pool.clone()));
        Self::with_stores(config, pool, users, otp_store)
    }

    pub fn with_stores(
        config: Config,
        pool: SqlitePool,
        users: Arc<dyn UserStore>,
        otp_store: Arc<dyn OtpStore>,
    ) -> Self {
        let tokens = Arc::new(TokenService::from_config(&config));
        let otp = Arc::new(OtpService::new(otp_store, config.otp_expiry()));
        let hasher = PasswordHasher::new(config.bcrypt_cost);

        AppState {
            config: Arc::new(config),
            pool,
            tokens,
            otp,
            users,
            hasher,
        }
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(
            Arc::clone(&self.users),
            self.hasher,
            self.config.storage_timeout(),
        )
    }
}
