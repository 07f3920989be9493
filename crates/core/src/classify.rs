//! Query dialect and data source classification.
//!
//! Responsibilities:
//! - Classify a widget query as a structured builder query or a raw
//!   `clickhouse_sql` query.
//! - Classify each builder sub-query by data source and count flagged log filters.
//! - Detect raw-dialect table usage and migration fingerprints at document level.
//!
//! Does NOT handle:
//! - Parsing the raw SQL dialect. Raw query text is opaque; detection is a
//!   substring search over the serialized document behind [`RawQueryDetector`].
//!
//! Invariants:
//! - Malformed sub-shapes contribute zero to every count.
//! - Document-level signals are booleans: at most one hit per document per signal.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Node;

pub const QUERY_TYPE_BUILDER: &str = "builder";
pub const QUERY_TYPE_CLICKHOUSE_SQL: &str = "clickhouse_sql";

/// Filter operators that force a substring scan over log attributes.
pub const FLAGGED_FILTER_OPS: [&str; 4] = ["contains", "ncontains", "like", "nlike"];

/// Attribute name that is indexed for substring search and never flagged.
pub const RESERVED_BODY_KEY: &str = "body";

pub const LOGS_TABLE_FINGERPRINTS: [&str; 2] = ["signoz_logs.distributed_logs", "signoz_logs.logs"];

pub const TRACES_TABLE_FINGERPRINTS: [&str; 3] = [
    "signoz_traces.distributed_signoz_index_v2",
    "signoz_traces.distributed_signoz_spans",
    "signoz_traces.distributed_signoz_error_index_v2",
];

pub const TIME_SERIES_V2_FINGERPRINT: &str = "time_series_v2";

pub const TAG_ATTRIBUTE_FINGERPRINTS: [&str; 2] = ["span_attributes", "tag_attributes"];

/// Dialect of a widget query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryDialect {
    Builder,
    ClickhouseSql,
    Other,
}

impl QueryDialect {
    pub fn from_query_type(query_type: Option<&str>) -> Self {
        match query_type {
            Some(QUERY_TYPE_BUILDER) => Self::Builder,
            Some(QUERY_TYPE_CLICKHOUSE_SQL) => Self::ClickhouseSql,
            _ => Self::Other,
        }
    }
}

/// Data source of a builder sub-query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Traces,
    Metrics,
    Logs,
    Other,
}

impl DataSource {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("traces") => Self::Traces,
            Some("metrics") => Self::Metrics,
            Some("logs") => Self::Logs,
            _ => Self::Other,
        }
    }
}

/// One classified item of `builder.queryData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderQuery<'a> {
    pub source: DataSource,
    /// `aggregateAttribute.key`, untrimmed. Only set for metrics items.
    pub metric_name: Option<&'a str>,
    /// Flagged filter items. Only non-zero for logs items.
    pub flagged_filters: usize,
}

/// Classification of a single widget query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryClassification<'a> {
    pub dialect: QueryDialect,
    pub builder_queries: Vec<BuilderQuery<'a>>,
}

impl QueryClassification<'_> {
    pub fn count(&self, source: DataSource) -> usize {
        self.builder_queries
            .iter()
            .filter(|q| q.source == source)
            .count()
    }

    pub fn flagged_filters(&self) -> usize {
        self.builder_queries.iter().map(|q| q.flagged_filters).sum()
    }
}

/// Classify a widget query specification.
///
/// Builder sub-queries are only reported for the builder dialect. A raw query
/// has no structured sub-queries; use a [`RawQueryDetector`] on the enclosing
/// document instead.
pub fn classify_query(query: &Value) -> QueryClassification<'_> {
    let dialect = QueryDialect::from_query_type(Node::new(query).key("queryType").str());
    let builder_queries = match dialect {
        QueryDialect::Builder => builder_queries(query).collect(),
        _ => Vec::new(),
    };
    QueryClassification {
        dialect,
        builder_queries,
    }
}

/// Classify every item of `builder.queryData`, ignoring `queryType`.
///
/// Non-mapping items are skipped.
pub fn builder_queries(query: &Value) -> impl Iterator<Item = BuilderQuery<'_>> {
    Node::new(query)
        .key("builder")
        .key("queryData")
        .items()
        .filter(|item| item.map().is_some())
        .map(classify_builder_item)
}

fn classify_builder_item(item: Node<'_>) -> BuilderQuery<'_> {
    let source = DataSource::from_name(item.key("dataSource").str());
    let metric_name = match source {
        DataSource::Metrics => item.key("aggregateAttribute").key("key").str(),
        _ => None,
    };
    let flagged_filters = match source {
        DataSource::Logs => item.value().map_or(0, count_flagged_log_filters),
        _ => 0,
    };
    BuilderQuery {
        source,
        metric_name,
        flagged_filters,
    }
}

/// Count `filters.items` entries that use a flagged operator on a non-body attribute.
///
/// An item is counted only if `op` is a string in [`FLAGGED_FILTER_OPS`] and
/// `key` is a mapping whose `key` field is not [`RESERVED_BODY_KEY`].
pub fn count_flagged_log_filters(item: &Value) -> usize {
    Node::new(item)
        .key("filters")
        .key("items")
        .items()
        .filter(|filter| {
            filter
                .key("op")
                .str()
                .is_some_and(|op| FLAGGED_FILTER_OPS.contains(&op))
        })
        .filter(|filter| {
            let key = filter.key("key");
            key.map().is_some() && key.key("key").str() != Some(RESERVED_BODY_KEY)
        })
        .count()
}

/// Document-level signals found by sniffing raw query text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDialectSignals {
    /// A logs table of the raw dialect is referenced.
    pub logs: bool,
    /// A traces table of the raw dialect is referenced.
    pub traces: bool,
    /// The legacy time-series table is referenced.
    pub time_series_v2: bool,
    /// Tag/attribute map columns are referenced.
    pub tag_attributes: bool,
}

/// Detects raw-dialect usage in a whole document.
pub trait RawQueryDetector: Send + Sync {
    fn detect(&self, document: &Value) -> RawDialectSignals;
}

/// Substring search over the compact JSON serialization of the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringDetector;

impl RawQueryDetector for SubstringDetector {
    fn detect(&self, document: &Value) -> RawDialectSignals {
        let Ok(serialized) = serde_json::to_string(document) else {
            return RawDialectSignals::default();
        };
        let any = |needles: &[&str]| needles.iter().any(|n| serialized.contains(n));
        RawDialectSignals {
            logs: any(&LOGS_TABLE_FINGERPRINTS),
            traces: any(&TRACES_TABLE_FINGERPRINTS),
            time_series_v2: serialized.contains(TIME_SERIES_V2_FINGERPRINT),
            tag_attributes: any(&TAG_ATTRIBUTE_FINGERPRINTS),
        }
    }
}
