//! Persistence layer.
//!
//! SQL repositories over the shared SQLite pool, plus the in-memory OTP store.

pub mod doctor_repository;
pub mod medical_history_repository;
pub mod otp_repository;
pub mod user_repository;

use crate::errors::{ServiceError, ServiceResult};
use anyhow::anyhow;
use std::future::Future;
use std::time::Duration;

/// Awaits a storage call for at most `limit`.
///
/// A stalled database turns into `ServiceError::Storage` instead of holding
/// the request open.
pub async fn bounded<T, F>(limit: Duration, operation: &str, call: F) -> ServiceResult<T>
where
    F: Future<Output = ServiceResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!("Storage call '{}' timed out after {:?}", operation, limit);
            Err(ServiceError::Storage {
                source: anyhow!("{} timed out after {:?}", operation, limit),
            })
        }
    }
}
