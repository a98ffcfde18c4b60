//! Route configuration and setup

use crate::constants::{API_PREFIX, MAX_REQUEST_BODY_BYTES};
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub fn setup_routes(state: Arc<AppState>) -> Router {
    // Playback clients poll this from the site's pages.
    let public_routes = Router::new()
        .route(
            &format!("{}/video-access", API_PREFIX),
            get(handlers::access::video_access),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        );

    let relay_routes = Router::new()
        .route(
            &format!("{}/uploads", API_PREFIX),
            post(handlers::uploads::create_upload),
        )
        .route(
            &format!("{}/deletions", API_PREFIX),
            post(handlers::deletions::create_deletion),
        )
        .route(
            &format!("{}/serving-url", API_PREFIX),
            post(handlers::serving_url::resolve_serving_url),
        )
        .route(
            &format!("{}/check-domains", API_PREFIX),
            get(handlers::domains::check_domains),
        );

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(public_routes)
        .merge(relay_routes)
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
