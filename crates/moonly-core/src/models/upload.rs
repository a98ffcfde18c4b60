use crate::error::{ErrorKind, RelayError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Video container formats the CDN accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    Mp4,
    Webm,
}

impl VideoFormat {
    /// Map a MIME type (`video/mp4`, `video/webm; codecs=vp9`) or bare subtype.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            "video/mp4" | "mp4" => Some(Self::Mp4),
            "video/webm" | "webm" => Some(Self::Webm),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "mp4" => Some(Self::Mp4),
            "webm" => Some(Self::Webm),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp4 => "video/mp4",
            Self::Webm => "video/webm",
        }
    }
}

/// A locally staged upload, created per upload event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRequest {
    pub local_path: PathBuf,
    #[serde(default)]
    pub mime_type: String,
    pub client_domain: String,
    /// Size reported by the host; the staged file's metadata is authoritative.
    #[serde(default)]
    pub size_bytes: u64,
}

impl UploadRequest {
    /// Resolve the CDN format of this upload.
    ///
    /// The declared MIME type decides. Only when the host did not detect one
    /// (empty or `application/octet-stream`) does the file extension count.
    pub fn video_format(&self) -> Option<VideoFormat> {
        let mime = self.mime_type.trim();
        if mime.is_empty() || mime.eq_ignore_ascii_case("application/octet-stream") {
            VideoFormat::from_path(&self.local_path)
        } else {
            VideoFormat::from_mime(mime)
        }
    }
}

/// Result of relaying one staged upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    /// Not a CDN candidate; the host keeps the file as-is.
    PassThrough,
    /// The CDN stored the video; the local copy has been removed.
    Accepted { remote_url: String, size_bytes: u64 },
    Rejected { reason: RelayError },
}

impl UploadResult {
    pub fn rejected(reason: RelayError) -> Self {
        Self::Rejected { reason }
    }

    pub fn rejection_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Rejected { reason } => Some(reason.kind()),
            _ => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
