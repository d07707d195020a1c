//! `ch_search`: Companies House search through the proxy worker
//!
//! One GET per call, no retries. Every outcome, including HTTP errors and
//! transport faults, comes back as a [`SearchEnvelope`] value.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

use super::body::{parse_or_wrap, truncate_chars};
use super::sic::{normalize_sic_codes, value_to_string, SicCodes};
use crate::config::Config;
use crate::error::{error_chain, NorthernError, Result};

/// Result size requested when the caller does not pass one
pub const DEFAULT_SEARCH_SIZE: i64 = 100;

/// Upstream error bodies are cut to this many characters
pub const ERROR_TEXT_LIMIT: usize = 2000;

/// Validated parameters for one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub location: String,
    pub size: i64,
    /// Normalized codes; `None` when nothing survived normalization
    pub sic_codes: Option<String>,
}

impl SearchParams {
    pub fn new(location: &str, sic_codes: &SicCodes, size: i64) -> Self {
        let normalized = normalize_sic_codes(sic_codes);
        Self {
            location: location.trim().to_string(),
            size,
            sic_codes: (!normalized.is_empty()).then_some(normalized),
        }
    }

    /// Build parameters from raw `tools/call` arguments
    pub fn from_args(args: &Value) -> Result<Self> {
        let location = match args.get("location") {
            None | Some(Value::Null) => {
                return Err(NorthernError::InvalidInput("location is required".into()))
            }
            Some(v) => value_to_string(v),
        };
        let sic_codes = SicCodes::from_value(args.get("sic_codes"));
        let size = coerce_size(args.get("size"))?;

        Ok(Self::new(&location, &sic_codes, size))
    }

    /// Query string pairs; `sic_codes` is omitted entirely when absent
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("location", self.location.clone()),
            ("size", self.size.to_string()),
        ];
        if let Some(ref codes) = self.sic_codes {
            pairs.push(("sic_codes", codes.clone()));
        }
        pairs
    }
}

/// Coerce a caller-supplied size to an integer
fn coerce_size(value: Option<&Value>) -> Result<i64> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(DEFAULT_SEARCH_SIZE);
    };
    let invalid =
        || NorthernError::InvalidInput(format!("size must be an integer, got {}", value));

    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(invalid()),
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// Uniform result of a proxy search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEnvelope {
    Success {
        status: u16,
        data: Value,
    },
    UpstreamError {
        status: u16,
        content_type: String,
        text: String,
    },
    TransportError {
        error: String,
        detail: String,
    },
}

impl SearchEnvelope {
    /// Shape a received upstream response
    pub fn from_response(status: u16, content_type: &str, body: &str) -> Self {
        if status >= 400 {
            return SearchEnvelope::UpstreamError {
                status,
                content_type: content_type.to_string(),
                text: truncate_chars(body, ERROR_TEXT_LIMIT),
            };
        }
        SearchEnvelope::Success {
            status,
            data: parse_or_wrap(body),
        }
    }

    /// Shape a transport fault
    pub fn from_transport(err: &reqwest::Error) -> Self {
        SearchEnvelope::TransportError {
            error: format!("http_error: {}", transport_error_kind(err)),
            detail: error_chain(err),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, SearchEnvelope::Success { .. })
    }
}

impl Serialize for SearchEnvelope {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SearchEnvelope::Success { status, data } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("ok", &true)?;
                map.serialize_entry("status", status)?;
                map.serialize_entry("data", data)?;
                map.end()
            }
            SearchEnvelope::UpstreamError {
                status,
                content_type,
                text,
            } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("status", status)?;
                map.serialize_entry("content_type", content_type)?;
                map.serialize_entry("text", text)?;
                map.end()
            }
            SearchEnvelope::TransportError { error, detail } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("error", error)?;
                map.serialize_entry("detail", detail)?;
                map.end()
            }
        }
    }
}

/// Category of a reqwest failure
pub fn transport_error_kind(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_redirect() {
        "redirect"
    } else if err.is_decode() {
        "decode"
    } else if err.is_body() {
        "body"
    } else if err.is_builder() {
        "builder"
    } else if err.is_status() {
        "status"
    } else if err.is_request() {
        "request"
    } else {
        "unknown"
    }
}

/// Client for the search proxy worker
#[derive(Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    base_url: String,
    worker_key: Option<String>,
    user_agent: String,
    timeout: Duration,
}

impl SearchClient {
    pub fn new(config: &Config) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.worker_base_url.clone(),
            worker_key: config.worker_key.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.search_timeout,
        }
    }

    /// Run one search against the worker
    pub async fn search(&self, params: &SearchParams) -> SearchEnvelope {
        let mut request = self
            .client
            .get(&self.base_url)
            .query(&params.query_pairs())
            .header(USER_AGENT, &self.user_agent)
            .timeout(self.timeout);
        if let Some(ref key) = self.worker_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(
            location = %params.location,
            size = params.size,
            sic_codes = params.sic_codes.as_deref().unwrap_or(""),
            "Proxy search"
        );

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("Proxy search failed: {}", e);
                return SearchEnvelope::from_transport(&e);
            }
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        match response.text().await {
            Ok(body) => SearchEnvelope::from_response(status, &content_type, &body),
            Err(e) => {
                tracing::error!("Proxy search body read failed: {}", e);
                SearchEnvelope::from_transport(&e)
            }
        }
    }
}
