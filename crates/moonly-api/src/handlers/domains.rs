use crate::state::AppState;
use axum::{extract::State, Json};
use moonly_core::AllowList;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct AllowListDebugResponse {
    pub raw_field_value: Value,
    pub extracted_domains: Vec<String>,
    pub field_exists: bool,
}

/// Show what the relay reads from the options store.
pub async fn check_domains(State(state): State<Arc<AppState>>) -> Json<AllowListDebugResponse> {
    let raw = match state.relay.allow_list().raw_field().await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "Allow-list unreadable");
            None
        }
    };

    let extracted_domains = raw
        .as_ref()
        .map(|value| AllowList::from_raw(value).domain_names())
        .unwrap_or_default();

    Json(AllowListDebugResponse {
        field_exists: raw.is_some(),
        raw_field_value: raw.unwrap_or(Value::Null),
        extracted_domains,
    })
}
