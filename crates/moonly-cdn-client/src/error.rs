//! CDN client error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CdnClientError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status} for {url}: {body}")]
    Http { status: u16, url: String, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Response is missing the '{0}' field")]
    MissingField(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to create HTTP client: {0}")]
    Build(String),
}

impl CdnClientError {
    /// Whether a second attempt could plausibly succeed: transport failures and 5xx.
    pub fn is_transient(&self) -> bool {
        match self {
            CdnClientError::Timeout(_) | CdnClientError::Network(_) => true,
            CdnClientError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for CdnClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CdnClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            CdnClientError::Parse(err.to_string())
        } else {
            CdnClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CdnClientError {
    fn from(err: serde_json::Error) -> Self {
        CdnClientError::Parse(err.to_string())
    }
}
