use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use moonly_core::AccessDecision;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct AccessQuery {
    pub domain: Option<String>,
}

/// Polled by playback clients. Denies whenever the answer is unknown.
pub async fn video_access(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AccessQuery>,
) -> Json<AccessDecision> {
    let domain = query
        .domain
        .filter(|d| !d.trim().is_empty())
        .or_else(|| state.config().site_domain.clone());

    match domain {
        Some(domain) => Json(state.relay.check_access(&domain).await),
        None => Json(AccessDecision::deny()),
    }
}
