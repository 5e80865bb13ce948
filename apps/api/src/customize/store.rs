use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::customization::{CustomizationRecord, NewCustomization};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence for customization records. Insert and read only.
#[async_trait]
pub trait CustomizationStore: Send + Sync {
    async fn create(&self, new: NewCustomization) -> Result<CustomizationRecord, StoreError>;

    /// Records owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<CustomizationRecord>, StoreError>;
}

pub struct PgCustomizationStore {
    pool: PgPool,
}

impl PgCustomizationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomizationStore for PgCustomizationStore {
    async fn create(&self, new: NewCustomization) -> Result<CustomizationRecord, StoreError> {
        let record = sqlx::query_as::<_, CustomizationRecord>(
            r#"
            INSERT INTO customized_resumes
                (id, user_id, customized_text, original_file_name, prompt_version)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.customized_text)
        .bind(&new.original_file_name)
        .bind(&new.prompt_version)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<CustomizationRecord>, StoreError> {
        let records = sqlx::query_as::<_, CustomizationRecord>(
            "SELECT * FROM customized_resumes WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
