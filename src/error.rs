//! Error types for Northern

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for Northern operations
pub type Result<T> = std::result::Result<T, NorthernError>;

/// Main error type for Northern
#[derive(Error, Debug)]
pub enum NorthernError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Upstream returned invalid JSON: {0}")]
    InvalidUpstreamBody(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl NorthernError {
    /// Get error code for MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            NorthernError::InvalidInput(_) => -32602,
            _ => -32000,
        }
    }

    /// HTTP status used when the error surfaces through the registry endpoint
    pub fn status(&self) -> StatusCode {
        match self {
            NorthernError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            NorthernError::Upstream(_)
            | NorthernError::InvalidUpstreamBody(_)
            | NorthernError::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for NorthernError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            // Caller-facing message is returned bare
            NorthernError::InvalidInput(msg) => json!({ "error": msg }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

/// Error message including its sources, outermost first
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
