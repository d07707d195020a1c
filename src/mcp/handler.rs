//! Request dispatch for the Northern tool server

use async_trait::async_trait;
use serde_json::{json, Value};

use super::protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, ToolCallResult,
    METHOD_NOT_FOUND,
};
use super::tools::get_tool_definitions;
use crate::config::Config;
use crate::error::NorthernError;
use crate::tools::Toolbox;

/// MCP request handler
#[derive(Clone)]
pub struct NorthernHandler {
    toolbox: Toolbox,
}

impl NorthernHandler {
    pub fn new(config: &Config) -> Self {
        Self {
            toolbox: Toolbox::new(config),
        }
    }

    async fn handle_tool_call(&self, name: &str, arguments: Value) -> ToolCallResult {
        tracing::debug!(tool = name, "Tool call");

        match self.toolbox.call(name, &arguments).await {
            Ok(result) => ToolCallResult::json(&result),
            Err(e) => {
                tracing::warn!(tool = name, "Tool call rejected: {}", e);
                ToolCallResult::error(e.to_string())
            }
        }
    }
}

#[async_trait]
impl McpHandler for NorthernHandler {
    async fn handle_request(&self, request: McpRequest) -> McpResponse {
        match request.method.as_str() {
            methods::INITIALIZE => {
                let result = InitializeResult::default();
                McpResponse::success(request.id, json!(result))
            }
            methods::INITIALIZED => {
                // Notification, no response needed
                McpResponse::success(request.id, json!({}))
            }
            methods::PING => McpResponse::success(request.id, json!({})),
            methods::LIST_TOOLS => {
                let tools = get_tool_definitions();
                McpResponse::success(request.id, json!({"tools": tools}))
            }
            methods::CALL_TOOL => {
                let Some(name) = request.params.get("name").and_then(|v| v.as_str()) else {
                    return McpResponse::from_error(
                        request.id,
                        NorthernError::InvalidInput("tool name is required".into()),
                    );
                };
                let arguments = request
                    .params
                    .get("arguments")
                    .cloned()
                    .unwrap_or(json!({}));

                let tool_result = self.handle_tool_call(name, arguments).await;
                McpResponse::success(request.id, json!(tool_result))
            }
            _ => McpResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_upstream;
    use axum::{extract::RawQuery, routing::get, Json, Router};
    use pretty_assertions::assert_eq;

    fn request(id: i64, method: &str, params: Value) -> McpRequest {
        McpRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(id)),
            method: method.to_string(),
            params,
        }
    }

    fn tool_text(response: &McpResponse) -> Value {
        let result = response.result.as_ref().expect("tool result");
        let text = result["content"][0]["text"].as_str().expect("text content");
        serde_json::from_str(text).expect("json text")
    }

    #[tokio::test]
    async fn test_initialize() {
        let handler = NorthernHandler::new(&Config::default());
        let response = handler
            .handle_request(request(1, methods::INITIALIZE, json!({})))
            .await;
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "northern");
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_list_tools() {
        let handler = NorthernHandler::new(&Config::default());
        let response = handler
            .handle_request(request(2, methods::LIST_TOOLS, json!({})))
            .await;
        let tools = response.result.unwrap()["tools"].clone();
        assert_eq!(tools.as_array().unwrap().len(), 2);
        assert_eq!(tools[0]["name"], "ch_search");
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["location"]));
        assert_eq!(tools[1]["name"], "http_get");
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let handler = NorthernHandler::new(&Config::default());
        let response = handler
            .handle_request(request(3, "resources/list", json!({})))
            .await;
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_result() {
        let handler = NorthernHandler::new(&Config::default());
        let response = handler
            .handle_request(request(
                4,
                methods::CALL_TOOL,
                json!({"name": "nope", "arguments": {}}),
            ))
            .await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Unknown tool: nope"));
    }

    #[tokio::test]
    async fn test_call_without_name() {
        let handler = NorthernHandler::new(&Config::default());
        let response = handler
            .handle_request(request(7, methods::CALL_TOOL, json!({"arguments": {}})))
            .await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_ch_search_call() {
        let router = Router::new().route(
            "/advanced",
            get(|RawQuery(q): RawQuery| async move { Json(json!({"query": q})) }),
        );
        let base = spawn_upstream(router).await;
        let config = Config::default().with_worker_base_url(format!("{}/advanced", base));
        let handler = NorthernHandler::new(&config);

        let response = handler
            .handle_request(request(
                5,
                methods::CALL_TOOL,
                json!({
                    "name": "ch_search",
                    "arguments": {"location": "Hull", "sic_codes": ["62012", ""], "size": 5}
                }),
            ))
            .await;

        assert!(response.result.as_ref().unwrap().get("isError").is_none());
        assert_eq!(
            tool_text(&response),
            json!({
                "ok": true,
                "status": 200,
                "data": {"query": "location=Hull&size=5&sic_codes=62012"}
            })
        );
    }

    #[tokio::test]
    async fn test_http_get_failure_is_data() {
        let handler = NorthernHandler::new(&Config::default());
        let response = handler
            .handle_request(request(
                6,
                methods::CALL_TOOL,
                json!({"name": "http_get", "arguments": {"url": "::bad::"}}),
            ))
            .await;
        assert!(response.result.as_ref().unwrap().get("isError").is_none());
        assert!(tool_text(&response)["error"].is_string());
    }
}
