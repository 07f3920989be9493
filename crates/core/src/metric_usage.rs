//! Metric usage lookup across dashboards.
//!
//! Invariants:
//! - Matching is exact after trimming whitespace around `aggregateAttribute.key`.
//! - Unparsable documents are skipped; the index is advisory.
//! - Metrics with no usage have no entry in the index.

use rayon::prelude::*;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

use crate::analytics::dashboard_name;
use crate::classify::{DataSource, builder_queries};
use crate::document::parse_document;
use crate::metrics::record_document_skipped;
use crate::models::{DashboardRecord, MetricUsage, MetricUsageIndex};
use crate::widgets::walk;

/// Find the widgets of every record that chart one of `metric_names`.
pub fn index_metric_usage<S: AsRef<str>>(
    records: &[DashboardRecord],
    metric_names: &[S],
) -> MetricUsageIndex {
    let wanted: HashSet<&str> = metric_names.iter().map(AsRef::as_ref).collect();

    let per_document: Vec<Vec<(String, MetricUsage)>> = records
        .par_iter()
        .map(|record| match parse_document(&record.data) {
            Ok(document) => document_metric_usage(&record.uuid, &document, &wanted),
            Err(e) => {
                warn!(uuid = %record.uuid, error = %e, "Skipping dashboard in metric usage lookup");
                record_document_skipped("metric_usage");
                Vec::new()
            }
        })
        .collect();

    let mut index = MetricUsageIndex::new();
    for (metric, usage) in per_document.into_iter().flatten() {
        index.entry(metric).or_default().push(usage);
    }
    index
}

/// Usage records of a single parsed document, in widget order.
pub fn document_metric_usage(
    dashboard_id: &str,
    document: &Value,
    wanted: &HashSet<&str>,
) -> Vec<(String, MetricUsage)> {
    let dashboard_title = dashboard_name(document);
    walk(document)
        .flat_map(move |widget| {
            builder_queries(widget.query)
                .filter(|q| q.source == DataSource::Metrics)
                .filter_map(|q| q.metric_name.map(str::trim))
                .filter(move |name| wanted.contains(name))
                .map(move |name| {
                    let usage = MetricUsage {
                        dashboard_id: dashboard_id.to_string(),
                        dashboard_title: dashboard_title.to_string(),
                        widget_id: widget.id.to_string(),
                        widget_title: widget.title.unwrap_or_default().to_string(),
                    };
                    (name.to_string(), usage)
                })
        })
        .collect()
}
