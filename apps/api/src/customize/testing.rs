//! In-memory collaborators for pipeline and router tests.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::customize::store::{CustomizationStore, StoreError};
use crate::customize::upload::StagedUpload;
use crate::extract::{ExtractError, TextExtractor};
use crate::llm_client::{AiResponder, LlmError};
use crate::models::customization::{CustomizationRecord, NewCustomization};

/// Writes `contents` into `dir` and wraps it as a staged upload.
pub fn stage_file(dir: &Path, original_file_name: &str, contents: &[u8]) -> StagedUpload {
    let mut file = tempfile::NamedTempFile::new_in(dir).unwrap();
    file.write_all(contents).unwrap();
    StagedUpload::new(file.into_temp_path(), original_file_name.to_string())
}

/// Returns fixed text for any file that exists on disk.
pub struct FakeExtractor {
    text: Option<String>,
}

impl FakeExtractor {
    pub fn returning(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { text: None }
    }
}

#[async_trait]
impl TextExtractor for FakeExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        self.text.clone().ok_or_else(|| ExtractError::Pdf {
            path: path.to_path_buf(),
            message: "corrupt xref table".to_string(),
        })
    }
}

/// Records every prompt and answers with a fixed reply.
pub struct FakeAi {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeAi {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiResponder for FakeAi {
    async fn respond(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or(LlmError::Api {
            status: 429,
            message: "You exceeded your current quota".to_string(),
        })
    }
}

#[derive(Default)]
pub struct FakeStore {
    records: Mutex<Vec<CustomizationRecord>>,
    fail: bool,
    /// Deleted from disk while a record is being created.
    remove_on_create: Option<PathBuf>,
}

impl FakeStore {
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: true,
            remove_on_create: None,
        }
    }

    pub fn with_records(records: Vec<CustomizationRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            fail: false,
            remove_on_create: None,
        }
    }

    /// Succeeds, but deletes `path` first so a later removal of it fails.
    pub fn removing_on_create(path: PathBuf) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: false,
            remove_on_create: Some(path),
        }
    }

    pub fn records(&self) -> Vec<CustomizationRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl CustomizationStore for FakeStore {
    async fn create(&self, new: NewCustomization) -> Result<CustomizationRecord, StoreError> {
        if self.fail {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        if let Some(path) = &self.remove_on_create {
            std::fs::remove_file(path).unwrap();
        }
        let record = CustomizationRecord {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            customized_text: new.customized_text,
            original_file_name: new.original_file_name,
            prompt_version: new.prompt_version,
            created_at: Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<CustomizationRecord>, StoreError> {
        if self.fail {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut records: Vec<_> = self
            .records()
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
