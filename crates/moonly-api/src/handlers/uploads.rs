use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, Json};
use moonly_core::{RelayError, UploadRequest, UploadResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct UploadBody {
    pub local_path: PathBuf,
    #[serde(default)]
    pub mime_type: String,
    /// Falls back to `MOONLY_SITE_DOMAIN` when absent.
    #[serde(default)]
    pub client_domain: Option<String>,
    #[serde(default)]
    pub size_bytes: u64,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadResponse {
    Accepted { remote_url: String, size_bytes: u64 },
    PassThrough,
}

/// Relay a staged upload. Rejections render as `ErrorResponse` with the
/// uploader-facing message.
pub async fn create_upload(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<UploadBody>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    if body.local_path.as_os_str().is_empty() {
        return Err(RelayError::InvalidInput("local_path must not be empty".to_string()).into());
    }

    let client_domain = body
        .client_domain
        .filter(|d| !d.trim().is_empty())
        .or_else(|| state.config().site_domain.clone())
        .unwrap_or_default();

    let request = UploadRequest {
        local_path: body.local_path,
        mime_type: body.mime_type,
        client_domain,
        size_bytes: body.size_bytes,
    };

    match state.relay.validate_and_upload(&request).await {
        UploadResult::PassThrough => Ok(Json(UploadResponse::PassThrough)),
        UploadResult::Accepted {
            remote_url,
            size_bytes,
        } => Ok(Json(UploadResponse::Accepted {
            remote_url,
            size_bytes,
        })),
        UploadResult::Rejected { reason } => Err(reason.into()),
    }
}
