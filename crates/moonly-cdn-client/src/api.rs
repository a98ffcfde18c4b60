//! Domain methods for the CDN client.

use crate::{CdnClient, CdnClientError};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use tokio_util::io::ReaderStream;

/// Response of `check-domain` and `check-video-access`.
#[derive(Debug, Deserialize)]
pub struct AllowedResponse {
    #[serde(default)]
    pub allowed: Option<bool>,
}

impl AllowedResponse {
    /// Only an explicit boolean `true` counts.
    pub fn is_allowed(&self) -> bool {
        self.allowed == Some(true)
    }
}

/// Response of `upload-video`.
#[derive(Debug, Deserialize)]
pub struct UploadVideoResponse {
    #[serde(default)]
    pub url: Option<String>,
}

impl CdnClient {
    /// Ask the CDN whether a client domain may upload.
    pub async fn check_domain(&self, domain: &str) -> Result<bool, CdnClientError> {
        let response: AllowedResponse = self
            .post_json(
                "check-domain",
                &json!({ "domain": domain }),
                self.request_timeout(),
            )
            .await?;
        Ok(response.is_allowed())
    }

    /// Ask the CDN whether a client domain may currently stream video.
    pub async fn check_video_access(&self, client_domain: &str) -> Result<bool, CdnClientError> {
        let response: AllowedResponse = self
            .post_json(
                "check-video-access",
                &json!({ "client_domain": client_domain }),
                self.access_check_timeout(),
            )
            .await?;
        Ok(response.is_allowed())
    }

    /// Stream a staged video to the CDN under the given client namespace.
    ///
    /// Returns the public URL the CDN assigned.
    pub async fn upload_video(
        &self,
        path: &Path,
        mime_type: &str,
        client_name: &str,
    ) -> Result<String, CdnClientError> {
        let file = tokio::fs::File::open(path).await?;
        let length = file.metadata().await?.len();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("video.mp4")
            .to_string();

        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
        let part = Part::stream_with_length(body, length)
            .file_name(file_name)
            .mime_str(mime_type)?;
        let form = Form::new()
            .part("video", part)
            .text("client_name", client_name.to_string());

        let response: UploadVideoResponse = self
            .post_multipart("upload-video", form, self.upload_timeout())
            .await?;

        response
            .url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or(CdnClientError::MissingField("url"))
    }

    /// Ask the CDN to delete a previously uploaded video.
    pub async fn delete_video(&self, video_url: &str) -> Result<(), CdnClientError> {
        let form = Form::new().text("video_url", video_url.to_string());
        self.post_multipart_discard("delete-video", form, self.request_timeout())
            .await
    }
}
