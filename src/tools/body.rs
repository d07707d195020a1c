//! Response body shaping shared by the tools

use serde_json::{json, Value};

/// Upstream body after the structured-parse attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    Json(Value),
    /// Body was not valid JSON; raw text kept as received
    Text(String),
}

impl ParsedBody {
    /// Try JSON first, keep the raw text otherwise
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => ParsedBody::Json(value),
            Err(_) => ParsedBody::Text(text.to_string()),
        }
    }
}

/// Parse a body as JSON, wrapping non-JSON text as `{"text": <body>}`
pub fn parse_or_wrap(text: &str) -> Value {
    match ParsedBody::parse(text) {
        ParsedBody::Json(value) => value,
        ParsedBody::Text(raw) => json!({ "text": raw }),
    }
}

/// First `max_chars` characters of `text` (never splits a code point)
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        assert_eq!(
            ParsedBody::parse(r#"{"items": []}"#),
            ParsedBody::Json(json!({"items": []}))
        );
    }

    #[test]
    fn test_parse_text_fallback() {
        assert_eq!(
            ParsedBody::parse("plain text"),
            ParsedBody::Text("plain text".into())
        );
        assert_eq!(parse_or_wrap("plain text"), json!({"text": "plain text"}));
    }

    #[test]
    fn test_empty_body_falls_back() {
        assert_eq!(parse_or_wrap(""), json!({"text": ""}));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("", 5), "");
    }
}
