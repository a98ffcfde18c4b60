//! Domain authorization
//!
//! Every path that cannot positively confirm a domain answers `false`.

use crate::allow_list::AllowListSource;
use async_trait::async_trait;
use moonly_cdn_client::CdnClient;
use moonly_core::{DomainAuthorization, RelayConfig};
use std::sync::Arc;
use tracing::{debug, warn};

#[async_trait]
pub trait DomainAuthorizer: Send + Sync {
    /// `domain` is an already resolved and normalized host.
    async fn is_allowed(&self, domain: &str) -> bool;
}

/// Membership in the host's allow-list.
pub struct AllowListAuthorizer {
    source: Arc<dyn AllowListSource>,
}

impl AllowListAuthorizer {
    pub fn new(source: Arc<dyn AllowListSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl DomainAuthorizer for AllowListAuthorizer {
    async fn is_allowed(&self, domain: &str) -> bool {
        match self.source.allow_list().await {
            Ok(list) => {
                let allowed = list.contains(domain);
                debug!(
                    client_domain = %domain,
                    allowed = allowed,
                    entries = list.entries().len(),
                    "Allow-list lookup"
                );
                allowed
            }
            Err(e) => {
                warn!(client_domain = %domain, error = %e, "Allow-list unreadable, denying");
                false
            }
        }
    }
}

/// Ask the CDN's `check-domain` endpoint. Single attempt.
pub struct RemoteAuthorizer {
    client: CdnClient,
}

impl RemoteAuthorizer {
    pub fn new(client: CdnClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DomainAuthorizer for RemoteAuthorizer {
    async fn is_allowed(&self, domain: &str) -> bool {
        match self.client.check_domain(domain).await {
            Ok(allowed) => {
                debug!(client_domain = %domain, allowed = allowed, "Remote domain check");
                allowed
            }
            Err(e) => {
                warn!(client_domain = %domain, error = %e, "Remote domain check failed, denying");
                false
            }
        }
    }
}

pub fn authorizer_for(
    config: &RelayConfig,
    client: &CdnClient,
    source: Arc<dyn AllowListSource>,
) -> Arc<dyn DomainAuthorizer> {
    match config.domain_authorization {
        DomainAuthorization::AllowList => Arc::new(AllowListAuthorizer::new(source)),
        DomainAuthorization::Remote => Arc::new(RemoteAuthorizer::new(client.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allow_list::{AllowListError, JsonFileAllowList, StaticAllowList};
    use serde_json::Value;

    struct BrokenSource;

    #[async_trait]
    impl AllowListSource for BrokenSource {
        async fn raw_field(&self) -> Result<Option<Value>, AllowListError> {
            Err(AllowListError::Io(std::io::Error::other("options store down")))
        }
    }

    #[tokio::test]
    async fn allow_list_membership() {
        let source = StaticAllowList::new([" Viden.DK ", "børn.firma.dk"]);
        let authorizer = AllowListAuthorizer::new(Arc::new(source));
        assert!(authorizer.is_allowed("viden.dk").await);
        assert!(authorizer.is_allowed("børn.firma.dk").await);
        assert!(!authorizer.is_allowed("evil.com").await);
        assert!(!authorizer.is_allowed("").await);
    }

    #[tokio::test]
    async fn unreadable_source_denies() {
        let authorizer = AllowListAuthorizer::new(Arc::new(BrokenSource));
        assert!(!authorizer.is_allowed("viden.dk").await);
    }

    #[tokio::test]
    async fn corrupt_file_denies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allowed.json");
        std::fs::write(&path, "not json").unwrap();
        let authorizer = AllowListAuthorizer::new(Arc::new(JsonFileAllowList::new(path)));
        assert!(!authorizer.is_allowed("viden.dk").await);
    }

    #[tokio::test]
    async fn remote_authorizer_is_strict_and_fails_closed() {
        let mut server = mockito::Server::new_async().await;
        let _allowed = server
            .mock("POST", "/check-domain")
            .match_body(mockito::Matcher::PartialJson(
                serde_json::json!({ "domain": "viden.dk" }),
            ))
            .with_status(200)
            .with_body(r#"{"allowed":true}"#)
            .create_async()
            .await;
        let _truthy = server
            .mock("POST", "/check-domain")
            .match_body(mockito::Matcher::PartialJson(
                serde_json::json!({ "domain": "truthy.dk" }),
            ))
            .with_status(200)
            .with_body(r#"{"allowed":1}"#)
            .create_async()
            .await;
        let _error = server
            .mock("POST", "/check-domain")
            .match_body(mockito::Matcher::PartialJson(
                serde_json::json!({ "domain": "broken.dk" }),
            ))
            .with_status(500)
            .create_async()
            .await;

        let config = RelayConfig::new(server.url(), "test-key");
        let authorizer = RemoteAuthorizer::new(CdnClient::new(&config).unwrap());
        assert!(authorizer.is_allowed("viden.dk").await);
        assert!(!authorizer.is_allowed("truthy.dk").await);
        assert!(!authorizer.is_allowed("broken.dk").await);
    }
}
