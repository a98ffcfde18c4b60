//! Application setup
//!
//! Builds the relay from configuration, wires routes and runs the server.

pub mod routes;
pub mod server;

use crate::state::AppState;
use axum::Router;
use moonly_core::RelayConfig;
use moonly_relay::CdnRelay;
use std::sync::Arc;

/// Build application state and router from configuration.
pub fn initialize_app(config: RelayConfig) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    tracing::info!(
        cdn_base_url = %config.cdn_base_url,
        domain_authorization = ?config.domain_authorization,
        max_video_size_bytes = config.max_video_size_bytes,
        check_access_on_resolve = config.check_access_on_resolve,
        staging_dir = ?config.staging_dir,
        environment = %config.environment,
        "Initializing Moonly CDN relay"
    );

    // The upload route accepts host paths, so it must be confined.
    if config.staging_dir.is_none() {
        return Err(anyhow::anyhow!(
            "MOONLY_STAGING_DIR must be set to run the relay server"
        ));
    }

    let relay = CdnRelay::new(config)?;
    let state = Arc::new(AppState::new(relay));
    let router = routes::setup_routes(state.clone());
    Ok((state, router))
}
