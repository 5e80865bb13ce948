//! Reads the customization form and stages the uploaded resume on disk.

use std::path::Path;

use axum::extract::Multipart;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::customize::error::CustomizeError;

pub const JOB_DESCRIPTION_FIELD: &str = "jobDesc";

/// An uploaded file written to the upload directory for one request.
///
/// Dropping it removes the file best-effort; `remove` removes it and reports
/// failure.
#[derive(Debug)]
pub struct StagedUpload {
    path: TempPath,
    original_file_name: String,
}

impl StagedUpload {
    pub fn new(path: TempPath, original_file_name: String) -> Self {
        Self {
            path,
            original_file_name,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn original_file_name(&self) -> &str {
        &self.original_file_name
    }

    pub fn remove(self) -> std::io::Result<()> {
        self.path.close()
    }
}

/// Raw form contents. Either part may be absent.
#[derive(Debug, Default)]
pub struct CustomizeForm {
    pub job_description: Option<String>,
    pub upload: Option<StagedUpload>,
}

/// Walks the multipart stream. The `jobDesc` field supplies the job
/// description; the first part carrying a filename is staged as the resume.
/// Other parts are skipped. Zero-byte files count as missing.
pub async fn read_customize_form(
    multipart: &mut Multipart,
    upload_dir: &Path,
) -> Result<CustomizeForm, CustomizeError> {
    let mut form = CustomizeForm::default();

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() == Some(JOB_DESCRIPTION_FIELD) {
            form.job_description = Some(field.text().await?);
            continue;
        }

        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if form.upload.is_some() {
            continue;
        }

        tokio::fs::create_dir_all(upload_dir)
            .await
            .map_err(CustomizeError::Staging)?;

        let staged = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(&staged_suffix(&file_name))
            .tempfile_in(upload_dir)
            .map_err(CustomizeError::Staging)?;
        let (file, path) = staged.into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let mut written = 0usize;
        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk)
                .await
                .map_err(CustomizeError::Staging)?;
            written += chunk.len();
        }
        file.flush().await.map_err(CustomizeError::Staging)?;

        if written == 0 {
            debug!("Ignoring empty upload '{file_name}'");
            continue;
        }

        debug!("Staged upload '{file_name}' ({written} bytes) at {}", path.display());
        form.upload = Some(StagedUpload::new(path, file_name));
    }

    Ok(form)
}

/// Keeps a short alphanumeric extension from the client filename, if any.
fn staged_suffix(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staged_suffix_keeps_simple_extension() {
        assert_eq!(staged_suffix("Jane_Doe_Resume.PDF"), ".pdf");
        assert_eq!(staged_suffix("cv.docx"), ".docx");
    }

    #[test]
    fn test_staged_suffix_drops_odd_extensions() {
        assert_eq!(staged_suffix("resume"), "");
        assert_eq!(staged_suffix("resume.p/df"), "");
        assert_eq!(staged_suffix("resume.$(rm -rf)"), "");
        assert_eq!(staged_suffix("archive.averyverylongextension"), "");
    }

    #[test]
    fn test_staged_upload_remove_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = tempfile::NamedTempFile::new_in(dir.path())
            .unwrap()
            .into_temp_path();
        let file_path = path.to_path_buf();
        let upload = StagedUpload::new(path, "resume.pdf".to_string());

        assert!(file_path.exists());
        upload.remove().unwrap();
        assert!(!file_path.exists());
    }

    #[test]
    fn test_staged_upload_drop_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = tempfile::NamedTempFile::new_in(dir.path())
            .unwrap()
            .into_temp_path();
        let file_path = path.to_path_buf();

        drop(StagedUpload::new(path, "resume.pdf".to_string()));
        assert!(!file_path.exists());
    }
}
