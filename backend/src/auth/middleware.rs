//! Bearer token gate for protected routes.
//!
//! `authorize` is the whole decision: header, token service and clock in,
//! admitted claims or a rejection out. `jwt_auth` adapts it to axum.

use crate::api::common::ErrorResponse;
use crate::state::AppState;
use crate::utils::jwt::{Claims, TokenService};
use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use thiserror::Error;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Why a request was turned away by the gate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("Authorization header is missing")]
    MissingCredentials,
    #[error("Invalid Authorization header format")]
    MalformedCredentials,
    #[error("Invalid token")]
    InvalidToken(String),
}

impl AuthRejection {
    pub fn error_type(&self) -> &'static str {
        match self {
            AuthRejection::MissingCredentials => "missing_credentials",
            AuthRejection::MalformedCredentials => "malformed_credentials",
            AuthRejection::InvalidToken(_) => "invalid_token",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let details = match &self {
            AuthRejection::InvalidToken(detail) => Some(detail.clone()),
            _ => None,
        };
        let body = ErrorResponse::new(self.to_string(), self.error_type(), details);
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Decides whether a request carrying `header` is admitted at `now`.
pub fn authorize(
    header: Option<&str>,
    tokens: &TokenService,
    now: DateTime<Utc>,
) -> Result<Claims, AuthRejection> {
    let header = header
        .filter(|value| !value.is_empty())
        .ok_or(AuthRejection::MissingCredentials)?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthRejection::MalformedCredentials)?;

    tokens
        .parse_at(token.trim(), now)
        .map_err(|e| AuthRejection::InvalidToken(e.to_string()))
}

/// JWT authentication middleware
pub async fn jwt_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let claims = authorize(header, &state.tokens, Utc::now()).inspect_err(|rejection| {
        tracing::warn!(
            "Rejected {} {}: {}",
            request.method(),
            request.uri().path(),
            rejection
        )
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tokens() -> TokenService {
        TokenService::new("test-secret-key", Duration::hours(1), Duration::zero())
    }

    #[test]
    fn test_missing_header() {
        let tokens = tokens();
        assert_eq!(
            authorize(None, &tokens, Utc::now()),
            Err(AuthRejection::MissingCredentials)
        );
        assert_eq!(
            authorize(Some(""), &tokens, Utc::now()),
            Err(AuthRejection::MissingCredentials)
        );
    }

    #[test]
    fn test_wrong_scheme() {
        let tokens = tokens();
        let token = tokens.issue_for("user-1").unwrap();

        for header in [token.clone(), format!("Basic {token}"), format!("bearer {token}")] {
            assert_eq!(
                authorize(Some(&header), &tokens, Utc::now()),
                Err(AuthRejection::MalformedCredentials)
            );
        }
    }

    #[test]
    fn test_invalid_and_expired_tokens() {
        let tokens = tokens();
        assert!(matches!(
            authorize(Some("Bearer garbage"), &tokens, Utc::now()),
            Err(AuthRejection::InvalidToken(_))
        ));

        let expires_at = Utc::now() + Duration::minutes(1);
        let header = format!("Bearer {}", tokens.issue("user-1", expires_at).unwrap());
        assert!(matches!(
            authorize(Some(&header), &tokens, expires_at + Duration::seconds(1)),
            Err(AuthRejection::InvalidToken(_))
        ));
    }

    #[test]
    fn test_valid_token_is_admitted() {
        let tokens = tokens();
        let header = format!("Bearer {}", tokens.issue_for("user-1").unwrap());

        let claims = authorize(Some(&header), &tokens, Utc::now()).unwrap();
        assert_eq!(claims.user_id(), "user-1");
    }
}
