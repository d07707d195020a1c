//! MCP tool definitions for Northern

use serde_json::json;

use super::protocol::ToolDefinition;
use crate::tools::{CH_SEARCH, HTTP_GET};

/// All tool definitions for Northern
pub const TOOL_DEFINITIONS: &[(&str, &str, &str)] = &[
    (
        CH_SEARCH,
        "Search Companies House through the proxy worker by location and SIC codes. Returns {ok, status, data} on success, {ok: false, status, content_type, text} when the worker answers with an error, or {ok: false, error, detail} when the worker cannot be reached.",
        r#"{
            "type": "object",
            "properties": {
                "location": {"type": "string", "description": "Town, city or region to search in"},
                "sic_codes": {
                    "anyOf": [
                        {"type": "string"},
                        {"type": "array", "items": {"type": "string"}},
                        {"type": "null"}
                    ],
                    "description": "SIC code filter: \"41100\", \"41100,41202\" or [\"41100\", \"41202\"]"
                },
                "size": {"type": "integer", "default": 100, "description": "Maximum number of results"}
            },
            "required": ["location"]
        }"#,
    ),
    (
        HTTP_GET,
        "Simple HTTP GET for debugging connectivity. Returns status, headers and the body as json (or text, truncated), or {error} on failure.",
        r#"{
            "type": "object",
            "properties": {
                "url": {"type": "string", "description": "Absolute URL to fetch"}
            },
            "required": ["url"]
        }"#,
    ),
];

/// Get all tool definitions as ToolDefinition structs
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, description, schema)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemas_parse() {
        for (name, _, schema) in TOOL_DEFINITIONS {
            let parsed: serde_json::Value = serde_json::from_str(schema)
                .unwrap_or_else(|e| panic!("schema for {} is invalid: {}", name, e));
            assert_eq!(parsed["type"], "object");
        }
    }

    #[test]
    fn test_definitions() {
        let names: Vec<_> = get_tool_definitions().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["ch_search", "http_get"]);
    }
}
