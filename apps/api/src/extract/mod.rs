//! Plain-text extraction from uploaded resume documents.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract text from PDF {path}: {message}")]
    Pdf { path: PathBuf, message: String },

    #[error("Extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Converts a document on disk into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

/// PDF extractor backed by `pdf-extract`.
/// Parsing is CPU-bound, so it runs on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ExtractError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let owned_path = path.to_path_buf();
        tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf {
                path: owned_path,
                message: e.to_string(),
            })
        })
        .await?
    }
}
