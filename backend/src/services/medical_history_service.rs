//! Per-user medical history: random generation and lookup.

use crate::database::models::{Appointment, Issue, MedicalHistory, Prescription};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::bounded;
use crate::repositories::medical_history_repository::MedicalHistoryRepository;
use crate::utils::random::{coin_flip, int_between, pick};
use chrono::{DateTime, Duration, Months, Utc};
use rand::Rng;
use sqlx::SqlitePool;
use uuid::Uuid;

const CONDITIONS: &[&str] = &["Hypertension", "Diabetes", "Asthma", "Arthritis", "Migraine"];
const SEVERITIES: &[&str] = &["Mild", "Moderate", "Severe"];
const MEDICATIONS: &[&str] = &["Paracetamol", "Ibuprofen", "Metformin", "Insulin", "Aspirin"];
const DOCTOR_ROSTER: &[(&str, &str)] = &[
    ("doc1", "Dr. John Smith"),
    ("doc2", "Dr. Jane Doe"),
    ("doc3", "Dr. Alice Brown"),
    ("doc4", "Dr. Bob Taylor"),
];

/// A date 1-12 months and 0-30 days before `now`.
fn past_date<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
    let months = int_between(rng, 1, 12) as u32;
    let days = int_between(rng, 0, 30);
    now.checked_sub_months(Months::new(months))
        .unwrap_or(now)
        - Duration::days(days)
}

fn maybe_past_date<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if coin_flip(rng) {
        Some(past_date(rng, now))
    } else {
        None
    }
}

/// Builds a random history for `user_id`.
pub fn random_history<R: Rng + ?Sized>(rng: &mut R, user_id: &str) -> MedicalHistory {
    let now = Utc::now();

    let issue_count = int_between(rng, 1, 5);
    let medical_issues = (0..issue_count)
        .map(|_| Issue {
            condition: pick(rng, CONDITIONS).to_string(),
            severity: pick(rng, SEVERITIES).to_string(),
            notes: "Generated medical history notes.".to_string(),
            start_date: past_date(rng, now),
            end_date: maybe_past_date(rng, now),
        })
        .collect();

    let prescription_count = int_between(rng, 1, 5);
    let prescriptions = (0..prescription_count)
        .map(|_| Prescription {
            medication_name: pick(rng, MEDICATIONS).to_string(),
            dosage: format!("{} mg", int_between(rng, 100, 500)),
            start_date: past_date(rng, now),
            end_date: maybe_past_date(rng, now),
        })
        .collect();

    let appointment_count = int_between(rng, 1, 3);
    let appointments = (0..appointment_count)
        .map(|_| {
            let (doctor_id, doctor_name) = DOCTOR_ROSTER[rng.gen_range(0..DOCTOR_ROSTER.len())];
            Appointment {
                doctor_id: doctor_id.to_string(),
                doctor_name: doctor_name.to_string(),
                appointment_date: past_date(rng, now),
                notes: "Routine checkup.".to_string(),
            }
        })
        .collect();

    MedicalHistory {
        id: Uuid::now_v7().to_string(),
        user_id: user_id.to_string(),
        medical_issues,
        prescriptions,
        appointments,
        created_at: now,
    }
}

pub struct MedicalHistoryService<'a> {
    pool: &'a SqlitePool,
    storage_timeout: std::time::Duration,
}

impl<'a> MedicalHistoryService<'a> {
    pub fn new(pool: &'a SqlitePool, storage_timeout: std::time::Duration) -> Self {
        Self {
            pool,
            storage_timeout,
        }
    }

    /// Generates and stores a random history for `user_id`.
    pub async fn generate_history(&self, user_id: &str) -> ServiceResult<MedicalHistory> {
        let user_id = require_user_id(user_id)?;
        let history = random_history(&mut rand::thread_rng(), user_id);
        let repo = MedicalHistoryRepository::new(self.pool);

        bounded(self.storage_timeout, "create_history", async {
            repo.create_history(&history).await.map_err(Into::into)
        })
        .await?;

        tracing::info!("Medical history added for user: {}", user_id);
        Ok(history)
    }

    /// Latest history for `user_id`.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` when the user has no history yet
    pub async fn get_history(&self, user_id: &str) -> ServiceResult<MedicalHistory> {
        let user_id = require_user_id(user_id)?;
        let repo = MedicalHistoryRepository::new(self.pool);

        bounded(self.storage_timeout, "get_history", async {
            repo.get_latest_for_user(user_id).await.map_err(Into::into)
        })
        .await?
        .ok_or_else(|| ServiceError::not_found("Medical history", user_id))
    }
}

fn require_user_id(user_id: &str) -> ServiceResult<&str> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation("UserID is required"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_history_shape() {
        let mut rng = StdRng::seed_from_u64(11);
        let now = Utc::now();
        for _ in 0..50 {
            let history = random_history(&mut rng, "user-1");
            assert_eq!(history.user_id, "user-1");
            assert!((1..=5).contains(&history.medical_issues.len()));
            assert!((1..=5).contains(&history.prescriptions.len()));
            assert!((1..=3).contains(&history.appointments.len()));

            for issue in &history.medical_issues {
                assert!(issue.start_date < now);
                assert!(SEVERITIES.contains(&issue.severity.as_str()));
            }
            for prescription in &history.prescriptions {
                let mg: i64 = prescription.dosage.trim_end_matches(" mg").parse().unwrap();
                assert!((100..=500).contains(&mg));
            }
            for appointment in &history.appointments {
                assert!(DOCTOR_ROSTER.iter().any(|(id, _)| *id == appointment.doctor_id));
            }
        }
    }

    #[tokio::test]
    async fn test_generate_then_get() {
        let pool = test_pool().await;
        let service = MedicalHistoryService::new(&pool, std::time::Duration::from_secs(5));

        let generated = service.generate_history("user-1").await.unwrap();
        let fetched = service.get_history("user-1").await.unwrap();
        assert_eq!(fetched, generated);

        assert!(matches!(
            service.get_history("user-2").await,
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_blank_user_id_is_rejected() {
        let pool = test_pool().await;
        let service = MedicalHistoryService::new(&pool, std::time::Duration::from_secs(5));

        assert!(matches!(
            service.generate_history("  ").await,
            Err(ServiceError::Validation { .. })
        ));
    }
}
