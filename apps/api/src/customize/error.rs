use axum::extract::multipart::MultipartError;
use thiserror::Error;

use crate::customize::store::StoreError;
use crate::extract::ExtractError;
use crate::llm_client::LlmError;

/// Failure of one customization request, tagged by the step that failed.
/// Everything except `MissingInput` renders as the same generic 500.
#[derive(Debug, Error)]
pub enum CustomizeError {
    #[error("Both resume PDF and job description are required")]
    MissingInput,

    #[error("Failed to read multipart upload: {0}")]
    Upload(#[from] MultipartError),

    #[error("Failed to stage uploaded file: {0}")]
    Staging(#[source] std::io::Error),

    #[error("Text extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("AI call failed: {0}")]
    Ai(#[from] LlmError),

    #[error("Failed to persist customization: {0}")]
    Persistence(#[from] StoreError),

    #[error("Failed to delete uploaded file: {0}")]
    Cleanup(#[source] std::io::Error),
}
