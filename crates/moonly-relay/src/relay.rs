//! The CDN relay pipeline.

use crate::allow_list::{allow_list_source, AllowListSource};
use crate::authorizer::{authorizer_for, DomainAuthorizer};
use crate::retry::{with_retry, RetryConfig};
use moonly_cdn_client::{CdnClient, CdnClientError};
use moonly_core::{
    client_identifier, normalize_domain, resolve_client_host, AccessDecision, AttachmentRecord,
    RelayConfig, RelayError, UploadRequest, UploadResult,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

const MISSING_URL_MESSAGE: &str = "Failed to get CDN URL from response.";

/// Mediates between local media events and the remote CDN API.
///
/// Stateless apart from its configuration and HTTP client, so one instance is
/// shared across concurrent requests.
#[derive(Clone)]
pub struct CdnRelay {
    config: Arc<RelayConfig>,
    client: CdnClient,
    allow_list: Arc<dyn AllowListSource>,
    authorizer: Arc<dyn DomainAuthorizer>,
    retry: RetryConfig,
}

impl CdnRelay {
    pub fn new(config: RelayConfig) -> Result<Self, CdnClientError> {
        let client = CdnClient::new(&config)?;
        let allow_list = allow_list_source(&config);
        let authorizer = authorizer_for(&config, &client, allow_list.clone());
        Ok(Self::with_parts(config, client, allow_list, authorizer))
    }

    pub fn with_parts(
        config: RelayConfig,
        client: CdnClient,
        allow_list: Arc<dyn AllowListSource>,
        authorizer: Arc<dyn DomainAuthorizer>,
    ) -> Self {
        let retry = RetryConfig::from_config(&config);
        Self {
            config: Arc::new(config),
            client,
            allow_list,
            authorizer,
            retry,
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn client(&self) -> &CdnClient {
        &self.client
    }

    pub fn allow_list(&self) -> &Arc<dyn AllowListSource> {
        &self.allow_list
    }

    /// Resolve a site URL or host to the normalized form used for every check.
    pub fn client_host(client_domain: &str) -> Option<String> {
        resolve_client_host(client_domain).map(|host| normalize_domain(&host))
    }

    /// Whether a client domain may upload.
    pub async fn is_allowed(&self, client_domain: &str) -> bool {
        match Self::client_host(client_domain) {
            Some(host) => self.authorizer.is_allowed(&host).await,
            None => false,
        }
    }

    /// Decide whether a staged video goes to the CDN, and forward it if so.
    ///
    /// Existence and size are checked before authorization so an oversize file
    /// is always deleted. The local file is only removed on acceptance or when
    /// it exceeds the size ceiling. With a staging directory configured, files
    /// outside it are rejected untouched.
    pub async fn validate_and_upload(&self, req: &UploadRequest) -> UploadResult {
        let Some(format) = req.video_format() else {
            debug!(
                path = %req.local_path.display(),
                mime_type = %req.mime_type,
                "Not a CDN video, passing through"
            );
            return UploadResult::PassThrough;
        };

        let path = match self.staged_path(&req.local_path).await {
            Ok(path) => path,
            Err(e) => return UploadResult::rejected(e),
        };

        let size_bytes = match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => metadata.len(),
            _ => {
                return UploadResult::rejected(RelayError::NotFound(
                    req.local_path.display().to_string(),
                ))
            }
        };

        let max = self.config.max_video_size_bytes;
        if size_bytes > max {
            remove_staged_file(&path).await;
            info!(
                path = %path.display(),
                size_bytes = size_bytes,
                max_bytes = max,
                "Video exceeds size ceiling, staged file removed"
            );
            return UploadResult::rejected(RelayError::TooLarge {
                size: size_bytes,
                max,
            });
        }

        let Some(host) = Self::client_host(&req.client_domain) else {
            return UploadResult::rejected(RelayError::Unauthorized {
                domain: req.client_domain.clone(),
            });
        };

        if !self.authorizer.is_allowed(&host).await {
            info!(client_domain = %host, "Upload rejected, domain not authorized");
            return UploadResult::rejected(RelayError::Unauthorized { domain: host });
        }

        let client_name = client_identifier(&host);
        let start = Instant::now();
        let uploaded = with_retry(&self.retry, "upload-video", || {
            self.client
                .upload_video(&path, format.mime_type(), &client_name)
        })
        .await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match uploaded {
            Ok(remote_url) => {
                remove_staged_file(&path).await;
                info!(
                    client_domain = %host,
                    client_name = %client_name,
                    remote_url = %remote_url,
                    size_bytes = size_bytes,
                    duration_ms = duration_ms,
                    "Video relayed to CDN"
                );
                UploadResult::Accepted {
                    remote_url,
                    size_bytes,
                }
            }
            Err(e) => {
                warn!(
                    client_domain = %host,
                    size_bytes = size_bytes,
                    duration_ms = duration_ms,
                    error = %e,
                    "CDN upload failed, keeping staged file"
                );
                UploadResult::rejected(RelayError::UploadFailed(upload_failure_message(&e)))
            }
        }
    }

    /// Canonical form of a staged upload path, confined to the staging
    /// directory when one is configured.
    async fn staged_path(&self, local_path: &Path) -> Result<PathBuf, RelayError> {
        let not_found = || RelayError::NotFound(local_path.display().to_string());

        let Some(configured) = self.config.staging_dir.as_deref() else {
            return tokio::fs::canonicalize(local_path)
                .await
                .map_err(|_| not_found());
        };
        let staging_dir = tokio::fs::canonicalize(configured).await.map_err(|e| {
            warn!(
                staging_dir = %configured.display(),
                error = %e,
                "Staging directory unavailable"
            );
            RelayError::InvalidInput("Staging directory is unavailable.".to_string())
        })?;

        let outside = || {
            warn!(
                path = %local_path.display(),
                staging_dir = %staging_dir.display(),
                "Upload path outside staging directory, ignoring"
            );
            RelayError::InvalidInput("local_path must be inside the staging directory.".to_string())
        };

        match tokio::fs::canonicalize(local_path).await {
            Ok(resolved) if resolved.starts_with(&staging_dir) => Ok(resolved),
            Ok(_) => Err(outside()),
            // Missing files only count as NotFound when they would be staged.
            Err(_)
                if local_path.starts_with(&staging_dir) || local_path.starts_with(configured) =>
            {
                Err(not_found())
            }
            Err(_) => Err(outside()),
        }
    }

    /// Live access check for playback gating. Any failure denies.
    pub async fn check_access(&self, client_domain: &str) -> AccessDecision {
        let Some(host) = Self::client_host(client_domain) else {
            return AccessDecision::deny();
        };

        let start = Instant::now();
        match self.client.check_video_access(&host).await {
            Ok(true) => AccessDecision::allow(),
            Ok(false) => {
                debug!(client_domain = %host, "Video access disabled by CDN");
                AccessDecision::deny()
            }
            Err(e) => {
                warn!(
                    client_domain = %host,
                    duration_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "Access check failed, denying"
                );
                AccessDecision::deny()
            }
        }
    }

    /// Ask the CDN to delete a video. Never fails; errors are logged.
    pub async fn propagate_delete(&self, remote_url: &str) {
        let remote_url = remote_url.trim();
        if remote_url.is_empty() {
            return;
        }

        match with_retry(&self.retry, "delete-video", || {
            self.client.delete_video(remote_url)
        })
        .await
        {
            Ok(()) => info!(remote_url = %remote_url, "CDN video deleted"),
            Err(e) => warn!(remote_url = %remote_url, error = %e, "CDN delete failed"),
        }
    }

    /// Whether a stored location points at the configured CDN host.
    pub fn is_cdn_url(&self, url: &str) -> bool {
        let cdn_host = self.config.cdn_host.as_str();
        if cdn_host.is_empty() {
            return false;
        }
        url::Url::parse(url.trim())
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase))
            .is_some_and(|host| host == cdn_host)
    }

    /// URL the host should serve for an attachment.
    ///
    /// Remote records are served from the CDN. When access checks on resolve
    /// are enabled, a denied (or undeterminable) domain gets the disabled
    /// placeholder instead.
    pub async fn resolve_serving_url(
        &self,
        record: &AttachmentRecord,
        client_domain: Option<&str>,
    ) -> String {
        if !record.is_remote() {
            return record.local_url.clone();
        }

        if self.config.check_access_on_resolve {
            let domain = client_domain
                .map(str::to_string)
                .or_else(|| self.config.site_domain.clone())
                .unwrap_or_default();
            if !self.check_access(&domain).await.allowed {
                debug!(
                    attachment_id = record.id,
                    client_domain = %domain,
                    "Serving disabled placeholder"
                );
                return self.config.disabled_video_url.clone();
            }
        }

        record.attached_file_url.clone()
    }
}

fn upload_failure_message(err: &CdnClientError) -> String {
    match err {
        CdnClientError::Http { .. }
        | CdnClientError::Parse(_)
        | CdnClientError::MissingField(_) => MISSING_URL_MESSAGE.to_string(),
        CdnClientError::Timeout(_) => "Failed to upload to CDN: request timed out.".to_string(),
        _ => "Failed to upload to CDN: could not reach the CDN.".to_string(),
    }
}

async fn remove_staged_file(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(path = %path.display(), error = %e, "Failed to remove staged file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moonly_core::ErrorKind;
    use std::time::Duration;

    fn config_for(server: &mockito::Server, allowed: &[&str]) -> RelayConfig {
        let mut config = RelayConfig::new(server.url(), "test-key");
        config.allowed_domains = allowed.iter().map(|d| d.to_string()).collect();
        config.retry_backoff = Duration::from_millis(1);
        config
    }

    fn relay_for(server: &mockito::Server, allowed: &[&str]) -> CdnRelay {
        CdnRelay::new(config_for(server, allowed)).unwrap()
    }

    fn staged(dir: &tempfile::TempDir, name: &str, len: usize) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, vec![0u8; len]).unwrap();
        path
    }

    fn request(path: &Path, mime: &str, domain: &str) -> UploadRequest {
        UploadRequest {
            local_path: path.to_path_buf(),
            mime_type: mime.to_string(),
            client_domain: domain.to_string(),
            size_bytes: 0,
        }
    }

    #[tokio::test]
    async fn allowed_upload_is_accepted_and_local_copy_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = staged(&dir, "clip.mp4", 10 * 1024 * 1024);

        let mut server = mockito::Server::new_async().await;
        let upload = server
            .mock("POST", "/upload-video")
            .match_header("x-api-key", "test-key")
            .with_status(200)
            .with_body(r#"{"url":"https://moonlycdn.com/v/abc.mp4"}"#)
            .expect(1)
            .create_async()
            .await;

        let relay = relay_for(&server, &["viden.dk"]);
        let result = relay
            .validate_and_upload(&request(&path, "video/mp4", "https://viden.dk/"))
            .await;

        assert_eq!(
            result,
            UploadResult::Accepted {
                remote_url: "https://moonlycdn.com/v/abc.mp4".to_string(),
                size_bytes: 10_485_760,
            }
        );
        assert!(!path.exists());
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_domain_keeps_file_and_makes_no_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = staged(&dir, "clip.webm", 1024);

        let mut server = mockito::Server::new_async().await;
        let upload = server
            .mock("POST", "/upload-video")
            .expect(0)
            .create_async()
            .await;

        let relay = relay_for(&server, &["viden.dk"]);
        let result = relay
            .validate_and_upload(&request(&path, "video/webm", "evil.com"))
            .await;

        assert_eq!(result.rejection_kind(), Some(ErrorKind::Unauthorized));
        assert!(path.exists());
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn oversize_file_is_deleted_regardless_of_authorization() {
        let dir = tempfile::tempdir().unwrap();
        let allowed_path = staged(&dir, "allowed.mp4", 64);
        let denied_path = staged(&dir, "denied.mp4", 64);

        let mut server = mockito::Server::new_async().await;
        let upload = server
            .mock("POST", "/upload-video")
            .expect(0)
            .create_async()
            .await;

        let mut config = config_for(&server, &["viden.dk"]);
        config.max_video_size_bytes = 32;
        let relay = CdnRelay::new(config).unwrap();

        let allowed = relay
            .validate_and_upload(&request(&allowed_path, "video/mp4", "viden.dk"))
            .await;
        let denied = relay
            .validate_and_upload(&request(&denied_path, "video/mp4", "evil.com"))
            .await;

        for result in [allowed, denied] {
            assert_eq!(
                result,
                UploadResult::rejected(RelayError::TooLarge { size: 64, max: 32 })
            );
        }
        assert!(!allowed_path.exists());
        assert!(!denied_path.exists());
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn ceiling_is_inclusive() {
        let dir = tempfile::tempdir().unwrap();
        let at_ceiling = staged(&dir, "exact.mp4", 64);
        let over_ceiling = staged(&dir, "over.mp4", 65);

        let mut server = mockito::Server::new_async().await;
        let upload = server
            .mock("POST", "/upload-video")
            .with_status(200)
            .with_body(r#"{"url":"https://moonlycdn.com/v/exact.mp4"}"#)
            .expect(1)
            .create_async()
            .await;

        let mut config = config_for(&server, &["viden.dk"]);
        config.max_video_size_bytes = 64;
        let relay = CdnRelay::new(config).unwrap();

        let accepted = relay
            .validate_and_upload(&request(&at_ceiling, "video/mp4", "viden.dk"))
            .await;
        assert_eq!(
            accepted,
            UploadResult::Accepted {
                remote_url: "https://moonlycdn.com/v/exact.mp4".to_string(),
                size_bytes: 64,
            }
        );
        assert!(!at_ceiling.exists());

        let rejected = relay
            .validate_and_upload(&request(&over_ceiling, "video/mp4", "viden.dk"))
            .await;
        assert_eq!(
            rejected,
            UploadResult::rejected(RelayError::TooLarge { size: 65, max: 64 })
        );
        assert!(!over_ceiling.exists());
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn files_outside_staging_dir_are_never_touched() {
        let staging = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let inside = staged(&staging, "clip.mp4", 16);
        let outside = staged(&elsewhere, "secrets.conf", 16);
        let oversize_outside = staged(&elsewhere, "big.mp4", 4096);

        let mut server = mockito::Server::new_async().await;
        let upload = server
            .mock("POST", "/upload-video")
            .with_status(200)
            .with_body(r#"{"url":"https://moonlycdn.com/v/in.mp4"}"#)
            .expect(1)
            .create_async()
            .await;

        let mut config = config_for(&server, &["viden.dk"]);
        config.staging_dir = Some(staging.path().to_path_buf());
        config.max_video_size_bytes = 1024;
        let relay = CdnRelay::new(config).unwrap();

        let missing_outside = elsewhere.path().join("missing.mp4");
        for path in [&outside, &oversize_outside, &missing_outside] {
            let result = relay
                .validate_and_upload(&request(path, "video/mp4", "viden.dk"))
                .await;
            assert_eq!(result.rejection_kind(), Some(ErrorKind::InvalidInput));
        }
        assert!(outside.exists());
        assert!(oversize_outside.exists());

        let missing_inside = staging.path().join("gone.mp4");
        let result = relay
            .validate_and_upload(&request(&missing_inside, "video/mp4", "viden.dk"))
            .await;
        assert_eq!(result.rejection_kind(), Some(ErrorKind::NotFound));

        let result = relay
            .validate_and_upload(&request(&inside, "video/mp4", "viden.dk"))
            .await;
        assert!(result.is_accepted());
        assert!(!inside.exists());
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn non_video_passes_through_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = staged(&dir, "photo.png", 128);

        let mut server = mockito::Server::new_async().await;
        let upload = server
            .mock("POST", "/upload-video")
            .expect(0)
            .create_async()
            .await;

        let relay = relay_for(&server, &["viden.dk"]);
        for mime in ["image/png", "video/quicktime"] {
            let result = relay
                .validate_and_upload(&request(&path, mime, "viden.dk"))
                .await;
            assert_eq!(result, UploadResult::PassThrough);
        }
        assert!(path.exists());
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn missing_staged_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let server = mockito::Server::new_async().await;
        let relay = relay_for(&server, &["viden.dk"]);

        let result = relay
            .validate_and_upload(&request(&dir.path().join("gone.mp4"), "video/mp4", "viden.dk"))
            .await;
        assert_eq!(result.rejection_kind(), Some(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn response_without_url_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = staged(&dir, "clip.mp4", 256);

        let mut server = mockito::Server::new_async().await;
        let _upload = server
            .mock("POST", "/upload-video")
            .with_status(200)
            .with_body(r#"{"message":"stored somewhere"}"#)
            .create_async()
            .await;

        let relay = relay_for(&server, &["viden.dk"]);
        let result = relay
            .validate_and_upload(&request(&path, "video/mp4", "viden.dk"))
            .await;

        assert_eq!(
            result,
            UploadResult::rejected(RelayError::UploadFailed(MISSING_URL_MESSAGE.to_string()))
        );
        assert!(path.exists());
    }

    #[tokio::test]
    async fn server_error_is_retried_once_then_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = staged(&dir, "clip.mp4", 256);

        let mut server = mockito::Server::new_async().await;
        let upload = server
            .mock("POST", "/upload-video")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;

        let relay = relay_for(&server, &["viden.dk"]);
        let result = relay
            .validate_and_upload(&request(&path, "video/mp4", "viden.dk"))
            .await;

        assert_eq!(result.rejection_kind(), Some(ErrorKind::UploadFailed));
        assert!(path.exists());
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn upload_uses_transliterated_client_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = staged(&dir, "clip.webm", 16);

        let mut server = mockito::Server::new_async().await;
        let upload = server
            .mock("POST", "/upload-video")
            .match_body(mockito::Matcher::Regex("boern-firma-dk".to_string()))
            .with_status(200)
            .with_body(r#"{"url":"https://moonlycdn.com/v/def.webm"}"#)
            .create_async()
            .await;

        let relay = relay_for(&server, &["børn.firma.dk"]);
        let result = relay
            .validate_and_upload(&request(&path, "video/webm", "https://xn--brn-0na.firma.dk"))
            .await;

        assert!(result.is_accepted());
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn check_access_follows_remote_answer() {
        let mut server = mockito::Server::new_async().await;
        let _allowed = server
            .mock("POST", "/check-video-access")
            .match_body(mockito::Matcher::PartialJson(
                serde_json::json!({ "client_domain": "viden.dk" }),
            ))
            .with_status(200)
            .with_body(r#"{"allowed":true}"#)
            .create_async()
            .await;
        let _malformed = server
            .mock("POST", "/check-video-access")
            .match_body(mockito::Matcher::PartialJson(
                serde_json::json!({ "client_domain": "odd.dk" }),
            ))
            .with_status(200)
            .with_body(r#"{"allowed":"yes"}"#)
            .create_async()
            .await;

        let relay = relay_for(&server, &[]);
        assert!(relay.check_access("https://viden.dk/").await.allowed);
        assert!(!relay.check_access("odd.dk").await.allowed);
        assert!(!relay.check_access("").await.allowed);
    }

    #[tokio::test]
    async fn check_access_timeout_denies() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((socket, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(30)).await;
                drop(socket);
            }
        });

        let mut config = RelayConfig::new(format!("http://{}", addr), "test-key");
        config.access_check_timeout = Duration::from_millis(200);
        let relay = CdnRelay::new(config).unwrap();

        let started = Instant::now();
        let decision = relay.check_access("viden.dk").await;
        assert!(!decision.allowed);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn propagate_delete_twice_never_errors() {
        let mut server = mockito::Server::new_async().await;
        let delete = server
            .mock("POST", "/delete-video")
            .match_body(mockito::Matcher::Regex("abc.mp4".to_string()))
            .with_status(404)
            .expect(2)
            .create_async()
            .await;

        let relay = relay_for(&server, &[]);
        relay.propagate_delete("https://moonlycdn.com/v/abc.mp4").await;
        relay.propagate_delete("https://moonlycdn.com/v/abc.mp4").await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn propagate_delete_survives_unreachable_cdn() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut config = RelayConfig::new(format!("http://{}", addr), "test-key");
        config.retry_backoff = Duration::from_millis(1);
        let relay = CdnRelay::new(config).unwrap();
        relay.propagate_delete("https://moonlycdn.com/v/abc.mp4").await;
    }

    #[tokio::test]
    async fn resolve_serving_url_local_and_remote() {
        let server = mockito::Server::new_async().await;
        let relay = relay_for(&server, &[]);

        let mut record = AttachmentRecord {
            id: 1,
            attached_file_url: "2024/05/clip.mp4".to_string(),
            local_url: "https://viden.dk/wp-content/uploads/2024/05/clip.mp4".to_string(),
            filesize: None,
        };
        assert_eq!(
            relay.resolve_serving_url(&record, None).await,
            record.local_url
        );

        record.attached_file_url = "https://moonlycdn.com/v/abc.mp4".to_string();
        assert_eq!(
            relay.resolve_serving_url(&record, None).await,
            "https://moonlycdn.com/v/abc.mp4"
        );
    }

    #[tokio::test]
    async fn resolve_serving_url_substitutes_placeholder_when_denied() {
        let mut server = mockito::Server::new_async().await;
        let _denied = server
            .mock("POST", "/check-video-access")
            .with_status(200)
            .with_body(r#"{"allowed":false}"#)
            .create_async()
            .await;

        let mut config = config_for(&server, &[]);
        config.check_access_on_resolve = true;
        config.disabled_video_url = "https://moonlycdn.com/disabled.mp4".to_string();
        let relay = CdnRelay::new(config).unwrap();

        let record = AttachmentRecord {
            id: 2,
            attached_file_url: "https://moonlycdn.com/v/abc.mp4".to_string(),
            local_url: String::new(),
            filesize: Some(10),
        };
        assert_eq!(
            relay.resolve_serving_url(&record, Some("viden.dk")).await,
            "https://moonlycdn.com/disabled.mp4"
        );
        // No domain known at all also fails closed.
        assert_eq!(
            relay.resolve_serving_url(&record, None).await,
            "https://moonlycdn.com/disabled.mp4"
        );
    }

    #[tokio::test]
    async fn is_cdn_url_matches_configured_host() {
        let relay =
            CdnRelay::new(RelayConfig::new("https://moonlycdn.com/wp-json/cdn/v1", "key")).unwrap();
        assert!(relay.is_cdn_url("https://moonlycdn.com/v/abc.mp4"));
        assert!(relay.is_cdn_url("https://MoonlyCDN.com/v/abc.mp4"));
        assert!(!relay.is_cdn_url("https://viden.dk/wp-content/uploads/clip.mp4"));
        assert!(!relay.is_cdn_url("https://evil.com/?x=moonlycdn.com"));
        assert!(!relay.is_cdn_url("https://moonlycdn.com.evil.com/v/abc.mp4"));
        assert!(!relay.is_cdn_url("2024/05/moonlycdn.com.mp4"));
    }
}
