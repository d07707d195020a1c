//! Tool implementations exposed over MCP
//!
//! - `ch_search`: proxy search by location and SIC codes
//! - `http_get`: connectivity check against an arbitrary URL

pub mod body;
pub mod fetch;
pub mod search;
pub mod sic;

use serde_json::Value;

pub use fetch::{FetchBody, FetchClient, FetchOutcome};
pub use search::{SearchClient, SearchEnvelope, SearchParams};
pub use sic::{normalize_sic_codes, SicCodes};

use crate::config::Config;
use crate::error::{NorthernError, Result};

pub const CH_SEARCH: &str = "ch_search";
pub const HTTP_GET: &str = "http_get";

/// Dispatches tool calls to their upstream clients
#[derive(Clone)]
pub struct Toolbox {
    search: SearchClient,
    fetch: FetchClient,
}

impl Toolbox {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::new();
        Self {
            search: SearchClient::with_client(client.clone(), config),
            fetch: FetchClient::with_client(client, config),
        }
    }

    /// Run a tool by name.
    ///
    /// Only caller-input problems are errors; upstream failures are part of
    /// the returned value.
    pub async fn call(&self, name: &str, args: &Value) -> Result<Value> {
        match name {
            CH_SEARCH => {
                let params = SearchParams::from_args(args)?;
                let envelope = self.search.search(&params).await;
                if !envelope.is_ok() {
                    tracing::debug!(location = %params.location, "Proxy search returned no data");
                }
                Ok(serde_json::to_value(envelope)?)
            }
            HTTP_GET => {
                let url = fetch::url_from_args(args)?;
                let outcome = self.fetch.fetch(&url).await;
                Ok(serde_json::to_value(outcome)?)
            }
            _ => Err(NorthernError::InvalidInput(format!("Unknown tool: {}", name))),
        }
    }
}
