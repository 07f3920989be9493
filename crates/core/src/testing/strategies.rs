//! Proptest strategies for dashboard documents.
//!
//! `arb_json` produces arbitrary trees. `arb_dashboard` produces documents that
//! are shaped like dashboards but put wrong types at every level with some
//! probability, which is what stored documents look like in practice.

use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

/// Any JSON value, up to a small depth.
pub fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z_ .]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..6).prop_map(Value::Array),
            btree_map("[a-zA-Z]{1,8}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

/// Either `good` or an arbitrary value of any type.
fn or_junk<S>(good: S) -> impl Strategy<Value = Value>
where
    S: Strategy<Value = Value> + 'static,
{
    prop_oneof![4 => good, 1 => arb_json()]
}

fn arb_filter_item() -> impl Strategy<Value = Value> {
    let op = prop_oneof![
        Just("contains"),
        Just("ncontains"),
        Just("like"),
        Just("nlike"),
        Just("="),
        Just("in"),
    ];
    let key = prop_oneof![Just("body"), Just("service.name"), Just("http.method")];
    or_junk(
        (op, key, any::<bool>()).prop_map(|(op, key, is_column)| {
            json!({ "op": op, "key": { "key": key, "isColumn": is_column }, "value": "x" })
        }),
    )
}

fn arb_query_data_item() -> impl Strategy<Value = Value> {
    let source = prop_oneof![
        Just("logs"),
        Just("traces"),
        Just("metrics"),
        Just("events"),
    ];
    let metric = prop_oneof![
        Just("cpu_usage"),
        Just(" cpu_usage "),
        Just("memory_rss"),
        Just("http_requests_total"),
    ];
    or_junk(
        (source, metric, vec(arb_filter_item(), 0..4)).prop_map(|(source, metric, items)| {
            json!({
                "dataSource": source,
                "aggregateAttribute": { "key": metric },
                "filters": { "items": items },
            })
        }),
    )
}

fn arb_query() -> impl Strategy<Value = Value> {
    let query_type = prop_oneof![Just("builder"), Just("clickhouse_sql"), Just("promql")];
    let raw = prop_oneof![
        Just("SELECT 1"),
        Just("SELECT * FROM signoz_logs.distributed_logs"),
        Just("SELECT * FROM signoz_traces.distributed_signoz_index_v2"),
        Just("SELECT * FROM signoz_metrics.time_series_v2"),
    ];
    or_junk(
        (query_type, raw, vec(arb_query_data_item(), 0..4)).prop_map(
            |(query_type, raw, query_data)| {
                json!({
                    "queryType": query_type,
                    "builder": { "queryData": query_data },
                    "clickhouse_sql": [ { "query": raw } ],
                })
            },
        ),
    )
}

/// A widget with a small id space so that documents share ids.
pub fn arb_widget() -> impl Strategy<Value = Value> {
    or_junk(
        ("w[0-9]", "[A-Za-z ]{0,10}", arb_query()).prop_map(|(id, title, query)| {
            json!({ "id": id, "title": title, "query": query })
        }),
    )
}

/// A dashboard-shaped document with wrong types mixed in at every level.
pub fn arb_dashboard() -> impl Strategy<Value = Value> {
    let title = prop_oneof![
        Just(json!("Service overview")),
        Just(json!("Sample Title")),
        Just(json!("")),
        Just(json!(42)),
        Just(Value::Null),
    ];
    let widgets = or_junk(vec(arb_widget(), 0..8).prop_map(Value::Array));
    (title, widgets).prop_map(|(title, widgets)| json!({ "title": title, "widgets": widgets }))
}
