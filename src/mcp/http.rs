//! HTTP transport for the MCP server
//!
//! Each `POST /mcp` carries one JSON-RPC message and gets the response in
//! the reply body. Notifications are acknowledged with `202 Accepted`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::protocol::{McpHandler, McpRequest, McpResponse, PARSE_ERROR, SERVER_NAME};

/// MCP over HTTP
pub struct McpHttpServer<H: McpHandler> {
    handler: Arc<H>,
    host: String,
    port: u16,
}

impl<H: McpHandler + 'static> McpHttpServer<H> {
    /// `host` may be a name (`localhost`) or an IPv4/IPv6 literal
    pub fn new(handler: H, host: impl Into<String>, port: u16) -> Self {
        Self {
            handler: Arc::new(handler),
            host: host.into(),
            port,
        }
    }

    /// Build the router
    pub fn router(handler: Arc<H>) -> Router {
        Router::new()
            .route("/mcp", post(rpc_handler::<H>))
            .route("/health", get(health_handler))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(handler)
    }

    /// Resolve the host and bind the listening socket
    pub async fn bind(&self) -> std::io::Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port)).await
    }

    /// Start the server
    pub async fn start(self) -> std::io::Result<()> {
        let listener = self.bind().await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        let app = Self::router(self.handler);

        tracing::info!("MCP HTTP server listening on {}", listener.local_addr()?);

        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Health check endpoint
async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "server": SERVER_NAME,
    }))
}

/// Handle one JSON-RPC message
async fn rpc_handler<H: McpHandler>(State(handler): State<Arc<H>>, body: String) -> Response {
    let request = match serde_json::from_str::<McpRequest>(&body) {
        Ok(request) => request,
        Err(e) => {
            let response = McpResponse::error(None, PARSE_ERROR, format!("Parse error: {}", e));
            return Json(response).into_response();
        }
    };

    let notification = request.is_notification();
    let response = handler.handle_request(request).await;
    if notification {
        return StatusCode::ACCEPTED.into_response();
    }
    Json(response).into_response()
}
