//! Widget traversal over a dashboard document.
//!
//! Invariants:
//! - Only elements of `widgets` that are mappings with a string `id` and a
//!   non-null `query` are yielded. Everything else is skipped without error.
//! - Source order is preserved. Duplicate ids are yielded as-is.

use serde_json::Value;

use crate::document::{Node, get, get_str};

/// A widget as seen by traversal. Borrows from the document.
#[derive(Debug, Clone, Copy)]
pub struct Widget<'a> {
    pub id: &'a str,
    pub title: Option<&'a str>,
    pub query: &'a Value,
}

impl<'a> Widget<'a> {
    /// Lens over the widget's query specification.
    pub fn query_node(&self) -> Node<'a> {
        Node::new(self.query)
    }
}

/// Walk the widgets of `document`.
///
/// The iterator borrows the document and is recomputed on every call.
pub fn walk(document: &Value) -> impl Iterator<Item = Widget<'_>> {
    Node::new(document)
        .key("widgets")
        .items()
        .filter_map(|node| node.value().and_then(widget_from_value))
}

fn widget_from_value(value: &Value) -> Option<Widget<'_>> {
    let id = get_str(value, "id")?;
    let query = get(value, "query")?;
    Some(Widget {
        id,
        title: get_str(value, "title"),
        query,
    })
}

/// Collect the widget identifiers of `document` in source order.
pub fn widget_ids(document: &Value) -> Vec<String> {
    walk(document).map(|w| w.id.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_walk_yields_widgets_in_order() {
        let doc = json!({
            "widgets": [
                { "id": "w1", "title": "CPU", "query": { "queryType": "builder" } },
                { "id": "w2", "query": {} }
            ]
        });
        let widgets: Vec<_> = walk(&doc).collect();
        assert_eq!(widgets.len(), 2);
        assert_eq!(widgets[0].id, "w1");
        assert_eq!(widgets[0].title, Some("CPU"));
        assert_eq!(widgets[1].id, "w2");
        assert_eq!(widgets[1].title, None);
    }

    #[test]
    fn test_walk_skips_widgets_without_id_or_query() {
        let doc = json!({
            "widgets": [
                { "title": "no id", "query": {} },
                { "id": "w-no-query" },
                { "id": "w-null-query", "query": null },
                { "id": 42, "query": {} },
                "not a widget",
                null,
                { "id": "kept", "query": { "queryType": "clickhouse_sql" } }
            ]
        });
        assert_eq!(widget_ids(&doc), vec!["kept".to_string()]);
    }

    #[test]
    fn test_walk_tolerates_non_array_widgets() {
        for doc in [
            json!({ "widgets": "oops" }),
            json!({ "widgets": null }),
            json!({ "widgets": { "id": "w1", "query": {} } }),
            json!({}),
            json!([]),
            Value::Null,
        ] {
            assert_eq!(walk(&doc).count(), 0, "document: {doc}");
        }
    }

    #[test]
    fn test_walk_keeps_duplicate_ids() {
        let doc = json!({
            "widgets": [
                { "id": "dup", "query": {} },
                { "id": "dup", "query": {} }
            ]
        });
        assert_eq!(widget_ids(&doc), vec!["dup", "dup"]);
    }

    #[test]
    fn test_walk_is_restartable() {
        let doc = json!({ "widgets": [ { "id": "w1", "query": {} } ] });
        assert_eq!(walk(&doc).count(), 1);
        assert_eq!(walk(&doc).count(), 1);
    }
}
