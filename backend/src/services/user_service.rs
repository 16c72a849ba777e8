//! User business logic service.
//!
//! Creates users with hashed passwords and authenticates them. Every store
//! call is bounded by the configured storage timeout.

use crate::database::models::{CreateUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::bounded;
use crate::repositories::user_repository::UserStore;
use crate::utils::password::PasswordHasher;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// New user data with the plaintext password, already validated.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: String,
}

/// Field a user logs in with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentity {
    Email(String),
    Phone(String),
}

impl LoginIdentity {
    pub fn value(&self) -> &str {
        match self {
            LoginIdentity::Email(value) | LoginIdentity::Phone(value) => value,
        }
    }
}

pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    storage_timeout: Duration,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, storage_timeout: Duration) -> Self {
        Self {
            store,
            hasher,
            storage_timeout,
        }
    }

    /// Hashes the password and persists the user under a fresh id.
    ///
    /// # Errors
    /// - `AlreadyExists` when the email or phone is already registered
    /// - `InternalError` when hashing fails
    /// - `Storage` on database failure or timeout
    pub async fn create_user(&self, new_user: NewUser) -> ServiceResult<User> {
        let existing = bounded(
            self.storage_timeout,
            "get_user_by_email",
            self.store.get_user_by_email(&new_user.email),
        )
        .await?;
        if existing.is_some() {
            return Err(ServiceError::already_exists("User", &new_user.email));
        }

        let existing = bounded(
            self.storage_timeout,
            "get_user_by_phone",
            self.store.get_user_by_phone(&new_user.phone),
        )
        .await?;
        if existing.is_some() {
            return Err(ServiceError::already_exists("User", &new_user.phone));
        }

        let password_hash = self.hasher.hash_blocking(new_user.password).await?;

        let data = CreateUser {
            id: Uuid::now_v7().to_string(),
            username: new_user.username,
            email: new_user.email,
            phone: new_user.phone,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash,
        };

        bounded(self.storage_timeout, "create_user", self.store.create_user(data)).await
    }

    /// Looks the user up and checks the password.
    ///
    /// # Errors
    /// - `NotFound` when no user matches the identity
    /// - `InvalidCredentials` on password mismatch
    pub async fn authenticate_user(
        &self,
        identity: &LoginIdentity,
        password: &str,
    ) -> ServiceResult<User> {
        let lookup = match identity {
            LoginIdentity::Email(email) => self.store.get_user_by_email(email),
            LoginIdentity::Phone(phone) => self.store.get_user_by_phone(phone),
        };

        let user = bounded(self.storage_timeout, "find_user", lookup)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", identity.value()))?;

        let matches = self
            .hasher
            .verify_blocking(user.password_hash.clone(), password.to_string())
            .await?;
        if !matches {
            return Err(ServiceError::invalid_credentials("Invalid password"));
        }

        Ok(user)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if user doesn't exist
    pub async fn get_user_required(&self, id: &str) -> ServiceResult<User> {
        bounded(self.storage_timeout, "get_user_by_id", self.store.get_user_by_id(id))
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::repositories::user_repository::UserRepository;

    async fn service() -> UserService {
        let store = Arc::new(UserRepository::new(test_pool().await));
        UserService::new(store, PasswordHasher::new(4), Duration::from_secs(5))
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            username: "grace".to_string(),
            email: email.to_string(),
            phone: "+14155552671".to_string(),
            first_name: None,
            last_name: Some("Hopper".to_string()),
            password: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let users = service().await;
        let user = users.create_user(new_user("grace@example.com")).await.unwrap();

        assert!(!user.id.is_empty());
        assert_ne!(user.password_hash, "password123");
        assert!(bcrypt::verify("password123", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let users = service().await;
        users.create_user(new_user("grace@example.com")).await.unwrap();

        let result = users.create_user(new_user("grace@example.com")).await;
        assert!(matches!(result, Err(ServiceError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_phone() {
        let users = service().await;
        users.create_user(new_user("grace@example.com")).await.unwrap();

        let mut other = new_user("ada@example.com");
        other.password = "different-password".to_string();
        let result = users.create_user(other).await;
        assert!(matches!(result, Err(ServiceError::AlreadyExists { .. })));

        // Phone login still resolves to the one account holding the number.
        let by_phone = LoginIdentity::Phone("+14155552671".to_string());
        let user = users.authenticate_user(&by_phone, "password123").await.unwrap();
        assert_eq!(user.email, "grace@example.com");
    }

    #[tokio::test]
    async fn test_authenticate_user() {
        let users = service().await;
        let created = users.create_user(new_user("grace@example.com")).await.unwrap();

        let by_email = LoginIdentity::Email("grace@example.com".to_string());
        let user = users.authenticate_user(&by_email, "password123").await.unwrap();
        assert_eq!(user.id, created.id);

        let by_phone = LoginIdentity::Phone("+14155552671".to_string());
        assert!(users.authenticate_user(&by_phone, "password123").await.is_ok());

        assert!(matches!(
            users.authenticate_user(&by_email, "password124").await,
            Err(ServiceError::InvalidCredentials { .. })
        ));

        let unknown = LoginIdentity::Email("nobody@example.com".to_string());
        assert!(matches!(
            users.authenticate_user(&unknown, "password123").await,
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_user_required() {
        let users = service().await;
        let created = users.create_user(new_user("grace@example.com")).await.unwrap();

        assert_eq!(users.get_user_required(&created.id).await.unwrap().email, "grace@example.com");
        assert!(matches!(
            users.get_user_required("missing").await,
            Err(ServiceError::NotFound { .. })
        ));
    }
}
