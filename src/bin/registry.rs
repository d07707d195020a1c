//! Northern registry endpoint
//!
//! Run with: northern-registry --port 5000
//!
//! The API key and registry URL come from the environment (see
//! `northern::config`); the flags below override them.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use northern::config::Config;
use northern::logging::init_logging;
use northern::registry::{registry_router, RegistryClient};

#[derive(Parser, Debug)]
#[command(name = "northern-registry")]
#[command(about = "Company profile lookup endpoint backed by Companies House")]
#[command(version)]
struct Args {
    /// Bind host (name or IP literal)
    #[arg(long, env = "NORTHERN_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Bind port
    #[arg(long, env = "NORTHERN_PORT", default_value = "5000")]
    port: u16,

    /// Registry API base URL [default: NORTHERN_REGISTRY_BASE_URL or built-in]
    #[arg(long)]
    registry_url: Option<String>,

    /// Companies House API key [default: COMPANIES_HOUSE_API_KEY]
    #[arg(long)]
    api_key: Option<String>,

    /// Emit logs as JSON
    #[arg(long, env = "NORTHERN_LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json)?;

    let mut config = Config::from_env();
    if let Some(url) = args.registry_url {
        config = config.with_registry_base_url(url);
    }
    if args.api_key.is_some() {
        config = config.with_companies_house_api_key(args.api_key);
    }

    let client = RegistryClient::new(&config);
    if !client.has_api_key() {
        tracing::warn!(
            "COMPANIES_HOUSE_API_KEY not set; lookups will fail with a configuration error"
        );
    }

    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("binding {}:{}", args.host, args.port))?;
    let app = registry_router(Arc::new(client));

    tracing::info!("Registry endpoint listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
