use axum_test::TestServer;
use moonly_api::constants::API_PREFIX;
use moonly_api::setup::routes::setup_routes;
use moonly_api::AppState;
use moonly_core::RelayConfig;
use moonly_relay::CdnRelay;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Returns the versioned API path, e.g. `api_path("/uploads")`.
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// Sidecar wired to a mock CDN.
pub struct TestApp {
    pub server: TestServer,
    pub cdn: mockito::ServerGuard,
    pub staging: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Write a staged upload of `len` bytes.
    pub fn stage(&self, name: &str, len: usize) -> PathBuf {
        let path = self.staging.path().join(name);
        std::fs::write(&path, vec![0u8; len]).unwrap();
        path
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

pub async fn setup_test_app_with(customize: impl FnOnce(&mut RelayConfig)) -> TestApp {
    let cdn = mockito::Server::new_async().await;
    let staging = tempfile::tempdir().unwrap();

    let mut config = RelayConfig::new(cdn.url(), "test-key");
    config.staging_dir = Some(staging.path().to_path_buf());
    config.allowed_domains = vec!["viden.dk".to_string(), "børn.firma.dk".to_string()];
    config.site_domain = Some("viden.dk".to_string());
    config.cdn_host = "moonlycdn.com".to_string();
    config.retry_backoff = Duration::from_millis(1);
    customize(&mut config);

    let relay = CdnRelay::new(config).unwrap();
    let server = TestServer::new(setup_routes(Arc::new(AppState::new(relay)))).unwrap();

    TestApp {
        server,
        cdn,
        staging,
    }
}
