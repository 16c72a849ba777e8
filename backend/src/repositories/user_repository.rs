//! Database repository for user accounts.

use crate::database::models::{CreateUser, User};
use crate::errors::{ServiceError, ServiceResult};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, username, email, phone, first_name, last_name, password_hash, \
                            created_at, updated_at";

/// Storage seam used by the authentication flow.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user. Fails with `AlreadyExists` when the email or phone is taken.
    async fn create_user(&self, user: CreateUser) -> ServiceResult<User>;

    async fn get_user_by_id(&self, id: &str) -> ServiceResult<Option<User>>;

    async fn get_user_by_email(&self, email: &str) -> ServiceResult<Option<User>>;

    async fn get_user_by_phone(&self, phone: &str) -> ServiceResult<Option<User>>;
}

/// SQLite-backed user store.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(&self, column: &str, value: &str) -> ServiceResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ? LIMIT 1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(anyhow::Error::from)?;

        Ok(user)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create_user(&self, user: CreateUser) -> ServiceResult<User> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO users (id, username, email, phone, first_name, last_name, password_hash, \
             created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(&user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    if db.message().contains("users.phone") {
                        ServiceError::already_exists("User", &user.phone)
                    } else {
                        ServiceError::already_exists("User", &user.email)
                    }
                }
                other => ServiceError::from(anyhow::Error::from(other)),
            })
    }

    async fn get_user_by_id(&self, id: &str) -> ServiceResult<Option<User>> {
        self.fetch_one_by("id", id).await
    }

    async fn get_user_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        self.fetch_one_by("email", email).await
    }

    async fn get_user_by_phone(&self, phone: &str) -> ServiceResult<Option<User>> {
        self.fetch_one_by("phone", phone).await
    }
}
