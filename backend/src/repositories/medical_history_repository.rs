//! Database repository for per-user medical histories.

use crate::database::models::{DocumentRow, MedicalHistory};
use anyhow::{Context, Result};
use sqlx::SqlitePool;

pub struct MedicalHistoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MedicalHistoryRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_history(&self, history: &MedicalHistory) -> Result<()> {
        let document =
            serde_json::to_string(history).context("failed to encode medical history")?;

        sqlx::query(
            "INSERT INTO medical_histories (id, user_id, document, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&history.id)
        .bind(&history.user_id)
        .bind(document)
        .bind(history.created_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Most recent history recorded for `user_id`.
    pub async fn get_latest_for_user(&self, user_id: &str) -> Result<Option<MedicalHistory>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, document FROM medical_histories WHERE user_id = ? \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|row| {
            serde_json::from_str(&row.document)
                .with_context(|| format!("corrupt medical history document {}", row.id))
        })
        .transpose()
    }
}
