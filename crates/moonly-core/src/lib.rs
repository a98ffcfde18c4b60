//! Moonly Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! small pure helpers (domain normalization, client identifiers, size formatting)
//! shared by every Moonly CDN relay component.

pub mod client_id;
pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod models;

// Re-export commonly used types
pub use client_id::client_identifier;
pub use config::{DomainAuthorization, RelayConfig};
pub use domain::{domains_match, normalize_domain, resolve_client_host};
pub use error::{ErrorKind, ErrorMetadata, LogLevel, RelayError};
pub use format::size_format;
pub use models::{
    AccessDecision, AllowList, AllowListEntry, AttachmentRecord, UploadRequest, UploadResult,
    VideoFormat,
};
