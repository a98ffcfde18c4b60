//! Error types module
//!
//! All relay failures are unified under [`RelayError`]. Each variant maps to one
//! [`ErrorKind`] and self-describes how it is presented to callers through the
//! [`ErrorMetadata`] trait (status code, machine-readable code, uploader-facing
//! message, log level).

use crate::format::size_format;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected outcomes like rejected domains
    Debug,
    /// Warning level - for recoverable issues like a flaky CDN
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UPLOAD_FAILED")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (the same request may succeed later)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (what the uploader sees)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Coarse classification of a relay failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unauthorized,
    TooLarge,
    NotFound,
    UploadFailed,
    AccessDenied,
    InvalidInput,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("Domain not authorized: {domain}")]
    Unauthorized { domain: String },

    #[error("Video too large: {size} bytes exceeds max {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("Staged file not found: {0}")]
    NotFound(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Access denied for domain: {domain}")]
    AccessDenied { domain: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::Unauthorized { .. } => ErrorKind::Unauthorized,
            RelayError::TooLarge { .. } => ErrorKind::TooLarge,
            RelayError::NotFound(_) => ErrorKind::NotFound,
            RelayError::UploadFailed(_) => ErrorKind::UploadFailed,
            RelayError::AccessDenied { .. } => ErrorKind::AccessDenied,
            RelayError::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::TooLarge => "TooLarge",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::UploadFailed => "UploadFailed",
            ErrorKind::AccessDenied => "AccessDenied",
            ErrorKind::InvalidInput => "InvalidInput",
        }
    }
}

/// Static metadata per kind: (http_status, error_code, recoverable, suggested_action, log_level).
fn static_metadata(kind: ErrorKind) -> (u16, &'static str, bool, Option<&'static str>, LogLevel) {
    match kind {
        ErrorKind::Unauthorized => (
            403,
            "DOMAIN_NOT_AUTHORIZED",
            false,
            Some("Ask the CDN operator to add this domain to the allow-list"),
            LogLevel::Debug,
        ),
        ErrorKind::TooLarge => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce the video size and upload again"),
            LogLevel::Debug,
        ),
        ErrorKind::NotFound => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the staged file still exists"),
            LogLevel::Debug,
        ),
        ErrorKind::UploadFailed => (
            502,
            "UPLOAD_FAILED",
            true,
            Some("Retry after a short delay"),
            LogLevel::Warn,
        ),
        ErrorKind::AccessDenied => (
            403,
            "ACCESS_DENIED",
            false,
            None,
            LogLevel::Debug,
        ),
        ErrorKind::InvalidInput => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            LogLevel::Debug,
        ),
    }
}

impl ErrorMetadata for RelayError {
    fn http_status_code(&self) -> u16 {
        static_metadata(self.kind()).0
    }

    fn error_code(&self) -> &'static str {
        static_metadata(self.kind()).1
    }

    fn is_recoverable(&self) -> bool {
        static_metadata(self.kind()).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        static_metadata(self.kind()).3
    }

    fn log_level(&self) -> LogLevel {
        static_metadata(self.kind()).4
    }

    fn client_message(&self) -> String {
        match self {
            RelayError::Unauthorized { .. } => {
                "This domain is not authorized to upload videos to the CDN.".to_string()
            }
            RelayError::TooLarge { max, .. } => format!(
                "Video is too large. Maximum allowed size is {}.",
                size_format(*max)
            ),
            RelayError::NotFound(_) => "File not found.".to_string(),
            RelayError::UploadFailed(ref msg) => msg.clone(),
            RelayError::AccessDenied { .. } => {
                "Access to this video has been disabled.".to_string()
            }
            RelayError::InvalidInput(ref msg) => msg.clone(),
        }
    }
}
