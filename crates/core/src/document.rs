//! Defensive accessors over untyped dashboard documents.
//!
//! Responsibilities:
//! - Project a `serde_json::Value` onto an expected shape (mapping, array, string,
//!   mapping-of-string) and report "absent" on any mismatch.
//! - Parse stored blobs into a document root.
//!
//! Does NOT handle:
//! - Schema validation. Unknown keys are ignored, and missing keys are normal.
//!
//! Invariants:
//! - No accessor panics or returns an error on a shape mismatch.
//! - An explicit JSON `null` is indistinguishable from a missing key.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::{DashboardError, Result};

/// Parse a stored blob into a document root.
///
/// The root must be a JSON object; anything else is reported as
/// [`DashboardError::InvalidDocument`].
pub fn parse_document(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| DashboardError::InvalidDocument(format!("not valid JSON: {e}")))?;
    if !value.is_object() {
        return Err(DashboardError::InvalidDocument(
            "document root must be an object".to_string(),
        ));
    }
    Ok(value)
}

/// Look up `key` on a mapping. Returns `None` for non-mappings, missing keys, and nulls.
pub fn get<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_object()?.get(key).filter(|v| !v.is_null())
}

/// Look up `key` and project it onto a mapping.
pub fn get_map<'a>(value: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    get(value, key)?.as_object()
}

/// Look up `key` and project it onto an array.
pub fn get_array<'a>(value: &'a Value, key: &str) -> Option<&'a [Value]> {
    get(value, key)?.as_array().map(Vec::as_slice)
}

/// Look up `key` and project it onto a string.
pub fn get_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    get(value, key)?.as_str()
}

/// Look up `key` and project it onto a mapping whose values are all strings.
///
/// A single non-string value makes the whole mapping absent.
pub fn get_string_map<'a>(value: &'a Value, key: &str) -> Option<BTreeMap<&'a str, &'a str>> {
    get_map(value, key)?
        .iter()
        .map(|(k, v)| v.as_str().map(|s| (k.as_str(), s)))
        .collect()
}

/// Element `index` of an array. Returns `None` for non-arrays, out of range, and nulls.
pub fn at(value: &Value, index: usize) -> Option<&Value> {
    value.as_array()?.get(index).filter(|v| !v.is_null())
}

/// Chainable lens over an optional node.
///
/// Every step on an absent node stays absent, so long paths read as one
/// expression:
///
/// ```
/// use dashlens_core::document::Node;
/// use serde_json::json;
///
/// let doc = json!({ "query": { "builder": { "queryData": [ { "dataSource": "logs" } ] } } });
/// let source = Node::new(&doc)
///     .key("query")
///     .key("builder")
///     .key("queryData")
///     .at(0)
///     .key("dataSource")
///     .str();
/// assert_eq!(source, Some("logs"));
/// assert_eq!(Node::new(&doc).key("widgets").at(3).str(), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Node<'a>(Option<&'a Value>);

impl<'a> Node<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self(Some(value).filter(|v| !v.is_null()))
    }

    pub fn absent() -> Self {
        Self(None)
    }

    pub fn key(self, key: &str) -> Self {
        Self(self.0.and_then(|v| get(v, key)))
    }

    pub fn at(self, index: usize) -> Self {
        Self(self.0.and_then(|v| at(v, index)))
    }

    pub fn value(self) -> Option<&'a Value> {
        self.0
    }

    pub fn is_present(self) -> bool {
        self.0.is_some()
    }

    pub fn map(self) -> Option<&'a Map<String, Value>> {
        self.0?.as_object()
    }

    pub fn array(self) -> Option<&'a [Value]> {
        self.0?.as_array().map(Vec::as_slice)
    }

    pub fn str(self) -> Option<&'a str> {
        self.0?.as_str()
    }

    /// Iterate the elements of an array node. Absent and non-array nodes yield nothing.
    pub fn items(self) -> impl Iterator<Item = Node<'a>> {
        self.array().unwrap_or_default().iter().map(Node::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_treats_null_as_absent() {
        let doc = json!({ "title": null });
        assert!(get(&doc, "title").is_none());
        assert!(get_str(&doc, "title").is_none());
    }

    #[test]
    fn test_get_on_non_mapping_is_absent() {
        assert!(get(&json!("widgets"), "widgets").is_none());
        assert!(get(&json!([1, 2]), "0").is_none());
        assert!(get(&Value::Null, "x").is_none());
    }

    #[test]
    fn test_shape_mismatch_is_absent() {
        let doc = json!({ "widgets": "not-an-array", "title": 7, "query": [] });
        assert!(get_array(&doc, "widgets").is_none());
        assert!(get_str(&doc, "title").is_none());
        assert!(get_map(&doc, "query").is_none());
    }

    #[test]
    fn test_get_string_map_requires_all_strings() {
        let doc = json!({ "key": { "key": "body", "type": "tag" }, "mixed": { "key": 1 } });
        let key = get_string_map(&doc, "key").unwrap();
        assert_eq!(key.get("key"), Some(&"body"));
        assert!(get_string_map(&doc, "mixed").is_none());
    }

    #[test]
    fn test_parse_document_rejects_non_object_root() {
        assert!(parse_document("[1,2,3]").is_err());
        assert!(parse_document("{not json").is_err());
        assert!(parse_document(r#"{"title":"ok"}"#).is_ok());
    }

    #[test]
    fn test_node_items_on_absent_is_empty() {
        let doc = json!({ "widgets": { "0": {} } });
        assert_eq!(Node::new(&doc).key("widgets").items().count(), 0);
        assert_eq!(Node::absent().items().count(), 0);
    }
}
