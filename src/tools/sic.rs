//! SIC code normalization
//!
//! Callers may pass classification codes as a single code, a comma separated
//! list, or an array. The union is resolved once at the tool boundary and
//! turned into the canonical `"41100,41202"` form used as a query parameter.

use serde_json::Value;

/// Classification filter as supplied by a caller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SicCodes {
    #[default]
    Absent,
    /// A single code or a comma separated list
    Scalar(String),
    Sequence(Vec<String>),
}

impl SicCodes {
    /// Resolve a raw tool argument into a filter.
    ///
    /// `null` is absent; strings are scalars; arrays become sequences with
    /// each element stringified; any other value is a scalar of its JSON text.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => SicCodes::Absent,
            Some(Value::String(s)) => SicCodes::Scalar(s.clone()),
            Some(Value::Array(items)) => {
                SicCodes::Sequence(items.iter().map(value_to_string).collect())
            }
            Some(other) => SicCodes::Scalar(other.to_string()),
        }
    }
}

impl From<&str> for SicCodes {
    fn from(s: &str) -> Self {
        SicCodes::Scalar(s.to_string())
    }
}

impl From<Vec<String>> for SicCodes {
    fn from(items: Vec<String>) -> Self {
        SicCodes::Sequence(items)
    }
}

impl<T: Into<SicCodes>> From<Option<T>> for SicCodes {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Stringify a JSON value the way a caller would write it by hand.
///
/// `null` becomes `""` (so null list entries drop out) and booleans keep
/// their JSON spelling.
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Normalize a filter to comma-joined, trimmed, non-empty codes.
///
/// Order is preserved and the output is a fixed point:
/// `normalize(Scalar(normalize(x))) == normalize(x)`.
pub fn normalize_sic_codes(codes: &SicCodes) -> String {
    match codes {
        SicCodes::Absent => String::new(),
        // Elements may themselves be comma separated
        SicCodes::Sequence(items) => join_codes(items.iter().flat_map(|s| s.split(','))),
        SicCodes::Scalar(s) => join_codes(s.split(',')),
    }
}

fn join_codes<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
