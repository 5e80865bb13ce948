use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted result of a resume customization request.
/// Rows are insert-only; nothing in this service updates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Full AI output: rewritten resume followed by the ATS report.
    pub customized_text: String,
    pub original_file_name: String,
    pub prompt_version: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the caller when creating a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomization {
    pub user_id: Uuid,
    pub customized_text: String,
    pub original_file_name: String,
    pub prompt_version: String,
}
