//! Moonly CLI: operator tool for the CDN relay.
//!
//! Reads the same MOONLY_* environment (and `.env`) as the sidecar. Every
//! command prints JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use moonly_cli::{init_tracing, resolve_domain, UploadReport};
use moonly_core::{client_identifier, RelayConfig, UploadRequest};
use moonly_relay::CdnRelay;
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "moonly", about = "Moonly CDN relay CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Relay a local video to the CDN. The file is removed once accepted.
    Upload {
        file: PathBuf,
        /// MIME type; inferred from the extension when omitted
        #[arg(long)]
        mime: Option<String>,
        /// Client domain; defaults to MOONLY_SITE_DOMAIN
        #[arg(long)]
        domain: Option<String>,
    },
    /// Ask the CDN whether a domain may stream video
    CheckAccess { domain: Option<String> },
    /// Check a domain against the configured authorization
    CheckDomain { domain: String },
    /// Delete a video from the CDN
    Delete { url: String },
    /// Print the CDN namespace key for a domain
    ClientId { domain: String },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Needs no configuration.
    if let Commands::ClientId { domain } = &cli.command {
        let host = CdnRelay::client_host(domain).unwrap_or_else(|| domain.trim().to_string());
        return print_json(&json!({
            "domain": host,
            "client_id": client_identifier(&host),
        }));
    }

    let config = RelayConfig::from_env().context("Failed to load relay configuration")?;
    let site_domain = config.site_domain.clone();
    let relay = CdnRelay::new(config).context("Failed to create CDN client")?;

    match cli.command {
        Commands::Upload { file, mime, domain } => {
            let request = UploadRequest {
                local_path: file,
                mime_type: mime.unwrap_or_default(),
                client_domain: resolve_domain(domain, site_domain.as_deref())?,
                size_bytes: 0,
            };
            let report = UploadReport::from(relay.validate_and_upload(&request).await);
            print_json(&report)?;
            if report.is_rejected() {
                std::process::exit(1);
            }
        }
        Commands::CheckAccess { domain } => {
            let domain = resolve_domain(domain, site_domain.as_deref())?;
            let decision = relay.check_access(&domain).await;
            print_json(&json!({ "domain": domain, "allowed": decision.allowed }))?;
        }
        Commands::CheckDomain { domain } => {
            let allowed = relay.is_allowed(&domain).await;
            print_json(&json!({
                "domain": CdnRelay::client_host(&domain),
                "allowed": allowed,
                "authorization": format!("{:?}", relay.config().domain_authorization),
            }))?;
        }
        Commands::Delete { url } => {
            relay.propagate_delete(&url).await;
            print_json(&json!({ "requested": url }))?;
        }
        Commands::ClientId { .. } => {}
    }

    Ok(())
}
