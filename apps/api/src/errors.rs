use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::customize::error::CustomizeError;
use crate::customize::store::StoreError;

pub const CUSTOMIZATION_FAILED_MESSAGE: &str = "AI resume customization failed";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every body has the shape `{ "message": ... }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// Client-side multipart failure, e.g. a body over `MAX_UPLOAD_BYTES`.
    #[error("Rejected upload ({status}): {message}")]
    Upload { status: StatusCode, message: String },

    #[error("Customization failed: {0}")]
    Customization(CustomizeError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<CustomizeError> for AppError {
    fn from(err: CustomizeError) -> Self {
        match err {
            CustomizeError::MissingInput => AppError::Validation(err.to_string()),
            CustomizeError::Upload(e) if e.status().is_client_error() => AppError::Upload {
                status: e.status(),
                message: upload_rejection_message(e.status(), e.body_text()),
            },
            other => AppError::Customization(other),
        }
    }
}

fn upload_rejection_message(status: StatusCode, detail: String) -> String {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        "Uploaded file is too large".to_string()
    } else {
        detail
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Not authorized".to_string()),
            AppError::Upload { status, message } => {
                tracing::warn!("Rejected upload ({status}): {message}");
                (*status, message.clone())
            }
            AppError::Customization(e) => {
                tracing::error!("Customize resume error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    CUSTOMIZATION_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
