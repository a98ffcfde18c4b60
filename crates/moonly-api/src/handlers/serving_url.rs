use crate::error::ValidatedJson;
use crate::state::AppState;
use axum::{extract::State, Json};
use moonly_core::AttachmentRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ServingUrlBody {
    #[serde(flatten)]
    pub record: AttachmentRecord,
    #[serde(default)]
    pub client_domain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ServingUrlResponse {
    pub url: String,
}

pub async fn resolve_serving_url(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<ServingUrlBody>,
) -> Json<ServingUrlResponse> {
    let url = state
        .relay
        .resolve_serving_url(&body.record, body.client_domain.as_deref())
        .await;
    Json(ServingUrlResponse { url })
}
