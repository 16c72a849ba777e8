//! Database repository for doctor profiles.

use crate::database::models::{Doctor, DocumentRow};
use anyhow::{Context, Result};
use sqlx::SqlitePool;

pub struct DoctorRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> DoctorRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_doctor(&self, doctor: &Doctor) -> Result<()> {
        let document = serde_json::to_string(doctor).context("failed to encode doctor")?;

        sqlx::query("INSERT INTO doctors (id, document, created_at) VALUES (?, ?, ?)")
            .bind(&doctor.id)
            .bind(document)
            .bind(doctor.created_at)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// All doctors, oldest first.
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, document FROM doctors ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                serde_json::from_str(&row.document)
                    .with_context(|| format!("corrupt doctor document {}", row.id))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Social;
    use crate::database::test_pool;
    use chrono::{Duration, Utc};

    fn doctor(id: &str, age_minutes: i64) -> Doctor {
        Doctor {
            id: id.to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            speciality: "Neurologist".to_string(),
            phone: "+1-555-123-4567".to_string(),
            email: "jane.doe@example.com".to_string(),
            clinic_name: "Prime Care".to_string(),
            clinic_address: "456 Oak Ave".to_string(),
            profile_picture: String::new(),
            rating: 4.5,
            experience: 12,
            availability: vec!["Monday".to_string()],
            fee: 120.0,
            languages: vec!["English".to_string()],
            qualifications: vec!["MD".to_string()],
            services: vec!["Consultations".to_string()],
            about: "About".to_string(),
            social_links: Social::default(),
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_doctors() {
        let pool = test_pool().await;
        let repo = DoctorRepository::new(&pool);
        assert!(repo.list_doctors().await.unwrap().is_empty());

        let newer = doctor("d-2", 1);
        let older = doctor("d-1", 10);
        repo.create_doctor(&newer).await.unwrap();
        repo.create_doctor(&older).await.unwrap();

        let doctors = repo.list_doctors().await.unwrap();
        assert_eq!(doctors, vec![older, newer]);
    }
}
