//! Password hashing with bcrypt.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("failed to hash password: {0}")]
    Hashing(String),
    #[error("stored password hash is malformed: {0}")]
    Malformed(String),
}

/// Salted, slow one-way hashing for user passwords.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        PasswordHasher { cost }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| HashError::Hashing(e.to_string()))
    }

    /// Returns `Ok(false)` on mismatch; errors only when `hashed` cannot be parsed.
    pub fn verify(&self, hashed: &str, plaintext: &str) -> Result<bool, HashError> {
        bcrypt::verify(plaintext, hashed).map_err(|e| HashError::Malformed(e.to_string()))
    }

    /// Runs `hash` on the blocking pool.
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, HashError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| HashError::Hashing(e.to_string()))?
    }

    /// Runs `verify` on the blocking pool.
    pub async fn verify_blocking(
        &self,
        hashed: String,
        plaintext: String,
    ) -> Result<bool, HashError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&hashed, &plaintext))
            .await
            .map_err(|e| HashError::Hashing(e.to_string()))?
    }
}
