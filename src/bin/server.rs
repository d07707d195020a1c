//! Northern MCP Server
//!
//! Run with: northern-server            (stdio)
//!           northern-server --http     (HTTP listener)
//!
//! Credentials, the worker URL and timeouts come from the environment
//! (see `northern::config`); the flags below override them.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use northern::config::Config;
use northern::logging::init_logging;
use northern::mcp::{McpHttpServer, McpServer, NorthernHandler};

#[derive(Parser, Debug)]
#[command(name = "northern-server")]
#[command(about = "Northern MCP server for Companies House search")]
#[command(version)]
struct Args {
    /// Serve MCP over HTTP instead of stdio
    #[arg(long)]
    http: bool,

    /// Bind host for the HTTP transport (name or IP literal)
    #[arg(long, env = "NORTHERN_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Bind port for the HTTP transport
    #[arg(long, env = "NORTHERN_PORT", default_value = "8000")]
    port: u16,

    /// Search proxy worker endpoint [default: NORTHERN_WORKER_BASE_URL or built-in]
    #[arg(long)]
    worker_url: Option<String>,

    /// Bearer key for the search proxy worker [default: CH_WORKER_KEY]
    #[arg(long)]
    worker_key: Option<String>,

    /// Timeout for ch_search in seconds [default: NORTHERN_SEARCH_TIMEOUT_SECS or 30]
    #[arg(long)]
    search_timeout_secs: Option<u64>,

    /// Timeout for http_get in seconds [default: NORTHERN_FETCH_TIMEOUT_SECS or 20]
    #[arg(long)]
    fetch_timeout_secs: Option<u64>,

    /// Emit logs as JSON
    #[arg(long, env = "NORTHERN_LOG_JSON")]
    log_json: bool,
}

impl Args {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(url) = &self.worker_url {
            config = config.with_worker_base_url(url.clone());
        }
        if self.worker_key.is_some() {
            config = config.with_worker_key(self.worker_key.clone());
        }
        if let Some(secs) = self.search_timeout_secs {
            config = config.with_search_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.fetch_timeout_secs {
            config = config.with_fetch_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json)?;

    let config = args.apply(Config::from_env());

    if config.worker_key.is_none() {
        tracing::info!("CH_WORKER_KEY not set; proxy searches will be sent without Authorization");
    }

    let handler = NorthernHandler::new(&config);

    if args.http {
        tracing::info!("Northern MCP server starting (http)...");
        McpHttpServer::new(handler, args.host.clone(), args.port)
            .start()
            .await
            .with_context(|| format!("serving on {}:{}", args.host, args.port))?;
    } else {
        tracing::info!("Northern MCP server starting (stdio)...");
        McpServer::new(handler).run().await?;
    }

    Ok(())
}
