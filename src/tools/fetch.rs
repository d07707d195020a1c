//! `http_get`: plain GET for checking connectivity from the server host

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

use super::body::{truncate_chars, ParsedBody};
use crate::config::Config;
use crate::error::{error_chain, NorthernError, Result};

/// Non-JSON bodies are cut to this many characters
pub const TEXT_BODY_LIMIT: usize = 4000;

/// Body of a fetched response
#[derive(Debug, Clone, PartialEq)]
pub enum FetchBody {
    Json(Value),
    Text(String),
}

/// Result of an `http_get` call; failures are values, never errors
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Response {
        status: u16,
        headers: BTreeMap<String, String>,
        body: FetchBody,
    },
    Failed {
        error: String,
    },
}

impl FetchOutcome {
    pub fn from_response(status: u16, headers: &HeaderMap, text: &str) -> Self {
        let body = match ParsedBody::parse(text) {
            ParsedBody::Json(value) => FetchBody::Json(value),
            ParsedBody::Text(raw) => FetchBody::Text(truncate_chars(&raw, TEXT_BODY_LIMIT)),
        };
        FetchOutcome::Response {
            status,
            headers: header_map(headers),
            body,
        }
    }

    pub fn failed(err: &dyn std::error::Error) -> Self {
        FetchOutcome::Failed {
            error: error_chain(err),
        }
    }
}

impl Serialize for FetchOutcome {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FetchOutcome::Response {
                status,
                headers,
                body,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("status", status)?;
                map.serialize_entry("headers", headers)?;
                match body {
                    FetchBody::Json(value) => map.serialize_entry("json", value)?,
                    FetchBody::Text(text) => map.serialize_entry("text", text)?,
                }
                map.end()
            }
            FetchOutcome::Failed { error } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

/// Flatten headers to a name -> value map; repeated names are joined with ", "
fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut out: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        out.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    out
}

/// Read the `url` argument of an `http_get` call
pub fn url_from_args(args: &Value) -> Result<String> {
    args.get("url")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| NorthernError::InvalidInput("url is required".into()))
}

/// Client for arbitrary debugging fetches
#[derive(Clone)]
pub struct FetchClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl FetchClient {
    pub fn new(config: &Config) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            timeout: config.fetch_timeout,
        }
    }

    /// GET `url`; any failure becomes [`FetchOutcome::Failed`]
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        tracing::debug!(url, "Debug fetch");

        match self.try_fetch(url).await {
            Ok(outcome) => outcome,
            Err(NorthernError::Http(e)) => {
                tracing::warn!("Debug fetch of {} failed: {}", url, e);
                FetchOutcome::failed(&e)
            }
            Err(e) => {
                tracing::warn!("Debug fetch of {} failed: {}", url, e);
                FetchOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<FetchOutcome> {
        let response = self.client.get(url).timeout(self.timeout).send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let text = response.text().await?;
        Ok(FetchOutcome::from_response(status, &headers, &text))
    }
}
