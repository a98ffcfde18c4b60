use moonly_core::{ErrorMetadata, UploadResult};
use serde::Serialize;

/// JSON shape printed by `moonly upload`.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadReport {
    Accepted { remote_url: String, size_bytes: u64 },
    PassThrough,
    Rejected { code: String, error: String },
}

impl UploadReport {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl From<UploadResult> for UploadReport {
    fn from(result: UploadResult) -> Self {
        match result {
            UploadResult::Accepted {
                remote_url,
                size_bytes,
            } => Self::Accepted {
                remote_url,
                size_bytes,
            },
            UploadResult::PassThrough => Self::PassThrough,
            UploadResult::Rejected { reason } => Self::Rejected {
                code: reason.error_code().to_string(),
                error: reason.client_message(),
            },
        }
    }
}

/// Domain named on the command line, else the configured site domain.
pub fn resolve_domain(arg: Option<String>, site_domain: Option<&str>) -> anyhow::Result<String> {
    arg.filter(|d| !d.trim().is_empty())
        .or_else(|| site_domain.map(str::to_string))
        .ok_or_else(|| anyhow::anyhow!("No domain given and MOONLY_SITE_DOMAIN is not set"))
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
