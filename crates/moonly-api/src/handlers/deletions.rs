use crate::error::ValidatedJson;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct DeletionBody {
    pub remote_url: String,
}

#[derive(Debug, Serialize)]
pub struct DeletionResponse {
    /// Whether the URL pointed at the CDN and a delete was sent.
    pub propagated: bool,
}

/// Propagate a local attachment deletion. Always 202; CDN failures are logged.
pub async fn create_deletion(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<DeletionBody>,
) -> (StatusCode, Json<DeletionResponse>) {
    let propagated = state.relay.is_cdn_url(&body.remote_url);
    if propagated {
        state.relay.propagate_delete(&body.remote_url).await;
    } else {
        tracing::debug!(remote_url = %body.remote_url, "Not a CDN URL, nothing to delete");
    }
    (StatusCode::ACCEPTED, Json(DeletionResponse { propagated }))
}
