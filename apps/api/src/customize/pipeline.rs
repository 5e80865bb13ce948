//! The customization pipeline: extract → prompt → AI → persist → clean up.
//!
//! Steps run strictly in order within the caller's task. Nothing is retried;
//! the first failure ends the request.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::customize::error::CustomizeError;
use crate::customize::prompts::{build_customize_prompt, PROMPT_VERSION};
use crate::customize::store::CustomizationStore;
use crate::customize::upload::{CustomizeForm, StagedUpload};
use crate::extract::TextExtractor;
use crate::llm_client::AiResponder;
use crate::models::customization::{CustomizationRecord, NewCustomization};

/// One validated request. Lives only for the duration of the HTTP call.
#[derive(Debug)]
pub struct CustomizationRequest {
    pub job_description: String,
    pub upload: StagedUpload,
    pub user_id: Uuid,
}

impl CustomizeForm {
    /// Both inputs are required. A blank job description counts as missing.
    /// On rejection any staged file is dropped, which removes it.
    pub fn into_request(self, user_id: Uuid) -> Result<CustomizationRequest, CustomizeError> {
        match (self.job_description, self.upload) {
            (Some(job_description), Some(upload)) if !job_description.trim().is_empty() => {
                Ok(CustomizationRequest {
                    job_description,
                    upload,
                    user_id,
                })
            }
            _ => Err(CustomizeError::MissingInput),
        }
    }
}

/// Runs the full pipeline and returns the persisted record.
///
/// The staged upload is deleted only after the record is stored; if an
/// earlier step fails it is removed when the request is dropped.
pub async fn customize_resume(
    extractor: &dyn TextExtractor,
    ai: &dyn AiResponder,
    store: &dyn CustomizationStore,
    request: CustomizationRequest,
) -> Result<CustomizationRecord, CustomizeError> {
    let CustomizationRequest {
        job_description,
        upload,
        user_id,
    } = request;

    info!(
        "Customizing resume '{}' for user {user_id}",
        upload.original_file_name()
    );

    let resume_text = extractor.extract(upload.path()).await?;
    if resume_text.trim().is_empty() {
        warn!(
            "No text extracted from '{}'; continuing with empty resume",
            upload.original_file_name()
        );
    }
    debug!("Extracted {} chars of resume text", resume_text.len());

    let prompt = build_customize_prompt(&job_description, &resume_text);
    let customized_text = ai.respond(&prompt).await?;
    debug!("AI returned {} chars", customized_text.len());

    let record = store
        .create(NewCustomization {
            user_id,
            customized_text,
            original_file_name: upload.original_file_name().to_string(),
            prompt_version: PROMPT_VERSION.to_string(),
        })
        .await?;

    upload.remove().map_err(CustomizeError::Cleanup)?;

    info!("Stored customization {} for user {user_id}", record.id);
    Ok(record)
}
