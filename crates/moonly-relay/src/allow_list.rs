//! Allow-list sources
//!
//! The allow-list lives in the host's options store as a repeater field, a JSON
//! array of `{"domain_name": "..."}` rows. The relay only ever reads it.

use async_trait::async_trait;
use moonly_core::{AllowList, RelayConfig};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AllowListError {
    #[error("Failed to read allow-list: {0}")]
    Io(#[from] std::io::Error),

    #[error("Allow-list is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only view of the host's options store.
#[async_trait]
pub trait AllowListSource: Send + Sync {
    /// Raw value of the repeater field, `None` when the field does not exist.
    async fn raw_field(&self) -> Result<Option<Value>, AllowListError>;

    /// Parsed allow-list. A missing field is an empty list.
    async fn allow_list(&self) -> Result<AllowList, AllowListError> {
        Ok(self
            .raw_field()
            .await?
            .map(|raw| AllowList::from_raw(&raw))
            .unwrap_or_default())
    }
}

/// Fixed list of domains, e.g. from `MOONLY_ALLOWED_DOMAINS`.
#[derive(Debug, Clone, Default)]
pub struct StaticAllowList {
    domains: Vec<String>,
}

impl StaticAllowList {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl AllowListSource for StaticAllowList {
    async fn raw_field(&self) -> Result<Option<Value>, AllowListError> {
        let rows: Vec<Value> = self
            .domains
            .iter()
            .map(|domain| json!({ "domain_name": domain }))
            .collect();
        Ok(Some(Value::Array(rows)))
    }
}

/// JSON export of the repeater field, re-read on every call so edits apply
/// without a restart.
#[derive(Debug, Clone)]
pub struct JsonFileAllowList {
    path: PathBuf,
}

impl JsonFileAllowList {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AllowListSource for JsonFileAllowList {
    async fn raw_field(&self) -> Result<Option<Value>, AllowListError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&contents)?))
    }
}

/// Pick the source the configuration names. The file wins over the inline list.
pub fn allow_list_source(config: &RelayConfig) -> Arc<dyn AllowListSource> {
    match &config.allowed_domains_file {
        Some(path) => Arc::new(JsonFileAllowList::new(path.clone())),
        None => Arc::new(StaticAllowList::new(config.allowed_domains.clone())),
    }
}
