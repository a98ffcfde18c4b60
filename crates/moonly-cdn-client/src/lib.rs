//! HTTP client for the Moonly CDN API.
//!
//! Provides a minimal client that carries the `X-API-KEY` header on every call,
//! generic JSON/multipart POST helpers with per-call timeouts, and the four CDN
//! endpoints (check-domain, upload-video, delete-video, check-video-access).

pub mod api;
pub mod error;

use moonly_core::RelayConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub use api::{AllowedResponse, UploadVideoResponse};
pub use error::CdnClientError;

/// Header the CDN authenticates requests with.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Maximum response body size accepted from the CDN (1 MB).
pub const MAX_RESPONSE_SIZE: usize = 1024 * 1024;

/// HTTP client for the Moonly CDN API.
#[derive(Clone)]
pub struct CdnClient {
    client: Client,
    base_url: String,
    api_key: String,
    request_timeout: Duration,
    upload_timeout: Duration,
    access_check_timeout: Duration,
}

impl fmt::Debug for CdnClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CdnClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CdnClient {
    pub fn new(config: &RelayConfig) -> Result<Self, CdnClientError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.upload_timeout.max(config.request_timeout))
            .build()
            .map_err(|e| CdnClientError::Build(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.cdn_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            request_timeout: config.request_timeout,
            upload_timeout: config.upload_timeout,
            access_check_timeout: config.access_check_timeout,
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn upload_timeout(&self) -> Duration {
        self.upload_timeout
    }

    pub fn access_check_timeout(&self) -> Duration {
        self.access_check_timeout
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(API_KEY_HEADER, self.api_key.as_str())
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T, CdnClientError> {
        let url = self.build_url(path);
        let request = self.client.post(&url).json(body).timeout(timeout);
        let request = self.apply_auth(request);

        tracing::debug!(url = %url, timeout_ms = timeout.as_millis() as u64, "CDN request");
        let response = request.send().await?;
        let response = check_response(response).await?;
        json_with_limit(response).await
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        timeout: Duration,
    ) -> Result<T, CdnClientError> {
        let url = self.build_url(path);
        let request = self.client.post(&url).multipart(form).timeout(timeout);
        let request = self.apply_auth(request);

        tracing::debug!(url = %url, timeout_ms = timeout.as_millis() as u64, "CDN request");
        let response = request.send().await?;
        let response = check_response(response).await?;
        json_with_limit(response).await
    }

    /// POST multipart form, ignoring the response body. Returns Ok(()) only on 200.
    pub async fn post_multipart_discard(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        timeout: Duration,
    ) -> Result<(), CdnClientError> {
        let url = self.build_url(path);
        let request = self.client.post(&url).multipart(form).timeout(timeout);
        let request = self.apply_auth(request);

        tracing::debug!(url = %url, timeout_ms = timeout.as_millis() as u64, "CDN request");
        let response = request.send().await?;
        check_response(response).await?;
        Ok(())
    }
}

/// Reject anything but 200 OK, capturing a short body excerpt for logs.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, CdnClientError> {
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        let url = response.url().to_string();
        tracing::debug!(status = status.as_u16(), url = %url, "CDN returned non-200 status");
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let body: String = body.chars().take(256).collect();
        return Err(CdnClientError::Http {
            status: status.as_u16(),
            url,
            body,
        });
    }
    Ok(response)
}

/// Read a response body with size limit and deserialize as JSON.
async fn json_with_limit<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, CdnClientError> {
    if let Some(len) = response.content_length() {
        if len as usize > MAX_RESPONSE_SIZE {
            return Err(CdnClientError::Parse(format!(
                "response too large ({} bytes)",
                len
            )));
        }
    }
    let bytes = response.bytes().await?;
    if bytes.len() > MAX_RESPONSE_SIZE {
        return Err(CdnClientError::Parse(format!(
            "response too large ({} bytes)",
            bytes.len()
        )));
    }
    serde_json::from_slice(&bytes).map_err(Into::into)
}
