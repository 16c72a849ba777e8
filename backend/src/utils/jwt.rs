//! JWT session tokens.
//!
//! Tokens are HS256-signed and carry only the user id (`sub`), the issue time
//! and the expiry. They are stateless: validity depends on the signature and
//! the clock at verification time.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(String),
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("token has expired")]
    Expired,
}

/// Issues and verifies session tokens with a process-wide secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: Duration,
    leeway: Duration,
}

impl TokenService {
    pub fn new(secret: &str, expires_in: Duration, leeway: Duration) -> Self {
        // Expiry is checked against an explicit clock in `parse_at`, so the
        // library only verifies signature, algorithm and claim shape.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        TokenService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_in,
            leeway,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            Duration::seconds(config.jwt_expires_in_seconds as i64),
            Duration::seconds(config.jwt_leeway_seconds as i64),
        )
    }

    /// Signs a token for `subject` that expires at `expires_at`.
    pub fn issue(&self, subject: &str, expires_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Signs a token for `subject` with the configured lifetime.
    pub fn issue_for(&self, subject: &str) -> Result<String, TokenError> {
        self.issue(subject, Utc::now() + self.expires_in)
    }

    /// Verifies `token` against the current wall clock.
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        self.parse_at(token, Utc::now())
    }

    /// Verifies signature and structure, then expiry relative to `now`.
    pub fn parse_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        if claims.sub.is_empty() {
            return Err(TokenError::Invalid("missing subject".to_string()));
        }

        if now.timestamp() > claims.exp + self.leeway.num_seconds() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key", Duration::hours(1), Duration::zero())
    }

    #[test]
    fn test_issue_then_parse_returns_subject() {
        let tokens = service();
        let expires_at = Utc::now() + Duration::minutes(10);
        let token = tokens.issue("user-123", expires_at).unwrap();

        let claims = tokens.parse(&token).unwrap();
        assert_eq!(claims.user_id(), "user-123");
        assert_eq!(claims.exp, expires_at.timestamp());
        assert!(claims.iat <= claims.exp);
    }

    #[test]
    fn test_expiry_is_strictly_after_exp() {
        let tokens = service();
        let expires_at = Utc::now() + Duration::minutes(10);
        let token = tokens.issue("user-123", expires_at).unwrap();

        // Still valid at the exact expiry second.
        assert!(tokens.parse_at(&token, expires_at).is_ok());

        let later = expires_at + Duration::seconds(1);
        assert!(matches!(
            tokens.parse_at(&token, later),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_leeway_extends_validity() {
        let tokens = TokenService::new("test-secret-key", Duration::hours(1), Duration::seconds(30));
        let expires_at = Utc::now() + Duration::minutes(1);
        let token = tokens.issue("user-123", expires_at).unwrap();

        assert!(tokens.parse_at(&token, expires_at + Duration::seconds(30)).is_ok());
        assert!(matches!(
            tokens.parse_at(&token, expires_at + Duration::seconds(31)),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let issuer = TokenService::new("another-secret", Duration::hours(1), Duration::zero());
        let token = issuer.issue_for("user-123").unwrap();

        assert!(matches!(service().parse(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert!(matches!(
            service().parse("not.a.jwt"),
            Err(TokenError::Invalid(_))
        ));
        assert!(matches!(service().parse(""), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_issue_for_uses_configured_lifetime() {
        let tokens = service();
        let before = Utc::now().timestamp();
        let claims = tokens.parse(&tokens.issue_for("user-1").unwrap()).unwrap();

        assert!(claims.exp >= before + 3600);
        assert!(claims.exp <= Utc::now().timestamp() + 3600);
    }
}
