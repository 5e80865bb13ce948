//! Axum route handlers for the customization API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Extension, Json,
};
use serde::Serialize;
use tracing::debug;

use crate::customize::error::CustomizeError;
use crate::customize::pipeline::customize_resume;
use crate::customize::upload::read_customize_form;
use crate::errors::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::customization::CustomizationRecord;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizeResponse {
    pub customized_text: String,
}

/// POST /api/customize-resume
///
/// multipart/form-data with a `jobDesc` text field and a resume file.
/// Returns the AI output verbatim.
pub async fn handle_customize_resume(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CustomizeResponse>, AppError> {
    // A body that isn't multipart carries neither input.
    let mut multipart = multipart.map_err(|rejection| {
        debug!("Rejected customize request body: {rejection}");
        CustomizeError::MissingInput
    })?;

    let form = read_customize_form(&mut multipart, &state.config.upload_dir).await?;
    let request = form.into_request(user.id)?;

    let record = customize_resume(
        state.extractor.as_ref(),
        state.ai.as_ref(),
        state.store.as_ref(),
        request,
    )
    .await?;

    Ok(Json(CustomizeResponse {
        customized_text: record.customized_text,
    }))
}

/// GET /api/customize-resume
///
/// The caller's past customizations, newest first.
pub async fn handle_list_customizations(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<CustomizationRecord>>, AppError> {
    let records = state.store.list_for_user(user.id).await?;
    Ok(Json(records))
}
