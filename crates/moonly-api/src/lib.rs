//! Moonly API Library
//!
//! This crate provides the HTTP handlers and application setup for the relay
//! sidecar: the host calls it from its media hooks, playback clients poll the
//! access endpoint.

pub mod constants;
pub mod error;
mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
