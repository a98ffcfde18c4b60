//! Configuration module
//!
//! Relay configuration is read from the environment (with `.env` support). The
//! CDN API key has no default and must be injected; everything else falls back
//! to a documented default.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CDN_BASE_URL: &str = "https://moonlycdn.com/wp-json/cdn/v1";
const DEFAULT_DISABLED_VIDEO_URL: &str = "https://moonlycdn.com/disabled.mp4";
const MAX_VIDEO_SIZE_BYTES: u64 = 1024 * 1024 * 1024;
const CONNECT_TIMEOUT_SECS: u64 = 5;
const REQUEST_TIMEOUT_SECS: u64 = 15;
const UPLOAD_TIMEOUT_SECS: u64 = 900;
const ACCESS_CHECK_TIMEOUT_SECS: u64 = 5;
const RETRY_BACKOFF_MS: u64 = 500;
const SERVER_PORT: u16 = 4100;
const SERVER_HOST: &str = "127.0.0.1";

/// How the relay decides whether a client domain may upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainAuthorization {
    /// Membership in the allow-list read from the options store.
    AllowList,
    /// Ask the CDN's `check-domain` endpoint.
    Remote,
}

impl DomainAuthorization {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "allow-list" | "allowlist" | "allow_list" | "local" => Some(Self::AllowList),
            "remote" => Some(Self::Remote),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct RelayConfig {
    pub cdn_base_url: String,
    pub api_key: String,
    pub max_video_size_bytes: u64,
    pub allowed_domains: Vec<String>,
    /// JSON export of the allow-list repeater field; takes precedence over `allowed_domains`.
    pub allowed_domains_file: Option<PathBuf>,
    pub domain_authorization: DomainAuthorization,
    pub disabled_video_url: String,
    /// Host that identifies CDN URLs in stored attachment records.
    pub cdn_host: String,
    pub check_access_on_resolve: bool,
    /// Domain of the site this relay serves, used when a caller does not name one.
    pub site_domain: Option<String>,
    /// Directory the host stages uploads in. When set, only files inside it
    /// are relayed.
    pub staging_dir: Option<PathBuf>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub upload_timeout: Duration,
    pub access_check_timeout: Duration,
    pub retry_enabled: bool,
    pub retry_backoff: Duration,
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("cdn_base_url", &self.cdn_base_url)
            .field("api_key", &"<redacted>")
            .field("max_video_size_bytes", &self.max_video_size_bytes)
            .field("allowed_domains", &self.allowed_domains)
            .field("allowed_domains_file", &self.allowed_domains_file)
            .field("domain_authorization", &self.domain_authorization)
            .field("disabled_video_url", &self.disabled_video_url)
            .field("cdn_host", &self.cdn_host)
            .field("check_access_on_resolve", &self.check_access_on_resolve)
            .field("site_domain", &self.site_domain)
            .field("staging_dir", &self.staging_dir)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("upload_timeout", &self.upload_timeout)
            .field("access_check_timeout", &self.access_check_timeout)
            .field("retry_enabled", &self.retry_enabled)
            .field("retry_backoff", &self.retry_backoff)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("environment", &self.environment)
            .finish()
    }
}

impl RelayConfig {
    /// Configuration with every default applied, for embedding and tests.
    pub fn new(cdn_base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let cdn_base_url = cdn_base_url.into().trim_end_matches('/').to_string();
        let cdn_host = host_of(&cdn_base_url).unwrap_or_default();
        Self {
            cdn_base_url,
            api_key: api_key.into(),
            max_video_size_bytes: MAX_VIDEO_SIZE_BYTES,
            allowed_domains: Vec::new(),
            allowed_domains_file: None,
            domain_authorization: DomainAuthorization::AllowList,
            disabled_video_url: DEFAULT_DISABLED_VIDEO_URL.to_string(),
            cdn_host,
            check_access_on_resolve: false,
            site_domain: None,
            staging_dir: None,
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            upload_timeout: Duration::from_secs(UPLOAD_TIMEOUT_SECS),
            access_check_timeout: Duration::from_secs(ACCESS_CHECK_TIMEOUT_SECS),
            retry_enabled: true,
            retry_backoff: Duration::from_millis(RETRY_BACKOFF_MS),
            server_host: SERVER_HOST.to_string(),
            server_port: SERVER_PORT,
            environment: "development".to_string(),
        }
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (the environment in production).
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cdn_base_url =
            var("MOONLY_CDN_BASE_URL").unwrap_or_else(|| DEFAULT_CDN_BASE_URL.to_string());

        let api_key = var("MOONLY_CDN_API_KEY")
            .ok_or_else(|| anyhow::anyhow!("MOONLY_CDN_API_KEY must be set"))?;

        let mut config = Self::new(cdn_base_url, api_key.trim());

        config.max_video_size_bytes = parse_or(
            var("MOONLY_MAX_VIDEO_SIZE_BYTES"),
            MAX_VIDEO_SIZE_BYTES,
        );

        config.allowed_domains = var("MOONLY_ALLOWED_DOMAINS")
            .map(|s| {
                s.split(',')
                    .map(|domain| domain.trim().to_string())
                    .filter(|domain| !domain.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        config.allowed_domains_file = var("MOONLY_ALLOWED_DOMAINS_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        if let Some(mode) = var("MOONLY_DOMAIN_AUTHORIZATION") {
            config.domain_authorization = DomainAuthorization::parse(&mode).ok_or_else(|| {
                anyhow::anyhow!(
                    "MOONLY_DOMAIN_AUTHORIZATION must be 'allow-list' or 'remote', got '{}'",
                    mode
                )
            })?;
        }

        if let Some(url) = var("MOONLY_DISABLED_VIDEO_URL").filter(|s| !s.is_empty()) {
            config.disabled_video_url = url;
        }

        if let Some(host) = var("MOONLY_CDN_HOST").filter(|s| !s.trim().is_empty()) {
            config.cdn_host = host.trim().to_lowercase();
        }

        config.check_access_on_resolve = parse_or(var("MOONLY_CHECK_ACCESS_ON_RESOLVE"), false);
        config.site_domain = var("MOONLY_SITE_DOMAIN").filter(|s| !s.trim().is_empty());
        config.staging_dir = var("MOONLY_STAGING_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(|s| PathBuf::from(s.trim()));

        config.connect_timeout = Duration::from_secs(parse_or(
            var("MOONLY_CONNECT_TIMEOUT_SECS"),
            CONNECT_TIMEOUT_SECS,
        ));
        config.request_timeout = Duration::from_secs(parse_or(
            var("MOONLY_REQUEST_TIMEOUT_SECS"),
            REQUEST_TIMEOUT_SECS,
        ));
        config.upload_timeout = Duration::from_secs(parse_or(
            var("MOONLY_UPLOAD_TIMEOUT_SECS"),
            UPLOAD_TIMEOUT_SECS,
        ));
        config.access_check_timeout = Duration::from_secs(parse_or(
            var("MOONLY_ACCESS_CHECK_TIMEOUT_SECS"),
            ACCESS_CHECK_TIMEOUT_SECS,
        ));
        config.retry_enabled = parse_or(var("MOONLY_RETRY_ENABLED"), true);
        config.retry_backoff = Duration::from_millis(parse_or(
            var("MOONLY_RETRY_BACKOFF_MS"),
            RETRY_BACKOFF_MS,
        ));

        if let Some(host) = var("MOONLY_BIND_ADDRESS").filter(|s| !s.trim().is_empty()) {
            config.server_host = host.trim().to_string();
        }
        config.server_port = match var("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        config.environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.api_key.is_empty() {
            return Err(anyhow::anyhow!("MOONLY_CDN_API_KEY must not be empty"));
        }

        if !self.cdn_base_url.starts_with("https://") && !self.cdn_base_url.starts_with("http://")
        {
            return Err(anyhow::anyhow!(
                "MOONLY_CDN_BASE_URL must be an http(s) URL"
            ));
        }

        if self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "MOONLY_MAX_VIDEO_SIZE_BYTES must be greater than zero"
            ));
        }

        let timeouts = [
            ("MOONLY_CONNECT_TIMEOUT_SECS", self.connect_timeout),
            ("MOONLY_REQUEST_TIMEOUT_SECS", self.request_timeout),
            ("MOONLY_UPLOAD_TIMEOUT_SECS", self.upload_timeout),
            ("MOONLY_ACCESS_CHECK_TIMEOUT_SECS", self.access_check_timeout),
        ];
        for (name, timeout) in timeouts {
            if timeout.is_zero() {
                return Err(anyhow::anyhow!("{} must be greater than zero", name));
            }
        }

        Ok(())
    }

    /// Check if the relay is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

fn host_of(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().to_lowercase().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn from_vars_requires_api_key() {
        let err = RelayConfig::from_vars(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("MOONLY_CDN_API_KEY"));
    }

    #[test]
    fn from_vars_applies_defaults() {
        let config = RelayConfig::from_vars(lookup(&[("MOONLY_CDN_API_KEY", "secret")])).unwrap();
        assert_eq!(config.cdn_base_url, DEFAULT_CDN_BASE_URL);
        assert_eq!(config.cdn_host, "moonlycdn.com");
        assert_eq!(config.max_video_size_bytes, 1024 * 1024 * 1024);
        assert_eq!(config.domain_authorization, DomainAuthorization::AllowList);
        assert!(config.allowed_domains.is_empty());
        assert!(config.retry_enabled);
        assert!(!config.check_access_on_resolve);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.server_port, 4100);
        assert!(config.staging_dir.is_none());
    }

    #[test]
    fn from_vars_reads_overrides() {
        let config = RelayConfig::from_vars(lookup(&[
            ("MOONLY_CDN_API_KEY", "secret"),
            ("MOONLY_CDN_BASE_URL", "http://localhost:9000/cdn/"),
            ("MOONLY_MAX_VIDEO_SIZE_BYTES", "524288000"),
            ("MOONLY_ALLOWED_DOMAINS", "viden.dk, børn.firma.dk ,,"),
            ("MOONLY_DOMAIN_AUTHORIZATION", "remote"),
            ("MOONLY_CHECK_ACCESS_ON_RESOLVE", "TRUE"),
            ("MOONLY_RETRY_ENABLED", "false"),
            ("MOONLY_STAGING_DIR", " /var/www/wp-content/uploads "),
            ("MOONLY_BIND_ADDRESS", "0.0.0.0"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.cdn_base_url, "http://localhost:9000/cdn");
        assert_eq!(config.cdn_host, "localhost");
        assert_eq!(config.max_video_size_bytes, 500 * 1024 * 1024);
        assert_eq!(config.allowed_domains, vec!["viden.dk", "børn.firma.dk"]);
        assert_eq!(config.domain_authorization, DomainAuthorization::Remote);
        assert!(config.check_access_on_resolve);
        assert!(!config.retry_enabled);
        assert_eq!(
            config.staging_dir,
            Some(PathBuf::from("/var/www/wp-content/uploads"))
        );
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn from_vars_rejects_unknown_authorization_mode() {
        let err = RelayConfig::from_vars(lookup(&[
            ("MOONLY_CDN_API_KEY", "secret"),
            ("MOONLY_DOMAIN_AUTHORIZATION", "open"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("MOONLY_DOMAIN_AUTHORIZATION"));
    }

    #[test]
    fn validate_rejects_zero_ceiling_and_timeouts() {
        let mut config = RelayConfig::new("https://moonlycdn.com/wp-json/cdn/v1", "secret");
        assert!(config.validate().is_ok());

        config.max_video_size_bytes = 0;
        assert!(config.validate().is_err());

        config.max_video_size_bytes = 1;
        config.access_check_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = RelayConfig::new("https://moonlycdn.com", "super-secret-key");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
