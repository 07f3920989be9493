//! Dashboard analytics.
//!
//! Responsibilities:
//! - Summarize one document: panel counts per data source, flagged log filters,
//!   raw-dialect usage, migration fingerprints.
//! - Aggregate summaries of every stored document into a [`DashboardsReport`].
//!
//! Does NOT handle:
//! - Fetching documents (callers pass records from a [`crate::store::DashboardStore`]).
//!
//! Invariants:
//! - Raw-dialect sniffing runs once per document, never once per widget.
//! - A document that fails to parse is excluded from the report and counted
//!   in `skipped_documents`; it never aborts the batch.

use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, warn};

use crate::classify::{
    DataSource, QUERY_TYPE_CLICKHOUSE_SQL, QueryDialect, RawQueryDetector, SubstringDetector,
    classify_query,
};
use crate::document::{Node, parse_document};
use crate::metrics::{record_document_skipped, record_documents_analyzed};
use crate::models::{AnalyticsSummary, DashboardRecord, DashboardsReport};
use crate::widgets::walk;

/// Title given to freshly created dashboards by the UI. Not a real name.
pub const PLACEHOLDER_TITLE: &str = "Sample Title";

/// The document's `title`, or empty when absent or not a string.
pub fn dashboard_name(document: &Value) -> &str {
    Node::new(document).key("title").str().unwrap_or_default()
}

/// True when the dashboard has a real title and at least one widget.
pub fn has_panel_and_name(document: &Value) -> bool {
    let node = Node::new(document);
    let named = node
        .key("title")
        .str()
        .is_some_and(|title| !title.is_empty() && title != PLACEHOLDER_TITLE);
    named && node.key("widgets").array().is_some_and(|w| !w.is_empty())
}

/// Summarize a document using substring detection for raw queries.
pub fn analyze(document: &Value) -> AnalyticsSummary {
    analyze_with(document, &SubstringDetector)
}

/// Summarize a document with a custom raw query detector.
pub fn analyze_with(document: &Value, detector: &dyn RawQueryDetector) -> AnalyticsSummary {
    let mut summary = AnalyticsSummary {
        title: dashboard_name(document).to_string(),
        has_panel_and_name: has_panel_and_name(document),
        ..AnalyticsSummary::default()
    };

    let mut has_raw_query = false;
    for widget in walk(document) {
        let classification = classify_query(widget.query);
        match classification.dialect {
            QueryDialect::Builder => {
                summary.logs_based_panels += classification.count(DataSource::Logs);
                summary.traces_based_panels += classification.count(DataSource::Traces);
                summary.metric_based_panels += classification.count(DataSource::Metrics);
                summary.logs_panels_with_attr_contains_op += classification.flagged_filters();
            }
            QueryDialect::ClickhouseSql => {
                has_raw_query |= widget.query_node().key(QUERY_TYPE_CLICKHOUSE_SQL).is_present();
            }
            QueryDialect::Other => {}
        }
    }

    let signals = detector.detect(document);
    summary.uses_logs_raw_query = has_raw_query && signals.logs;
    summary.uses_traces_raw_query = has_raw_query && signals.traces;
    summary.uses_time_series_v2 = signals.time_series_v2;
    summary.uses_tag_attributes = signals.tag_attributes;
    summary
}

/// Build the aggregate report over stored records.
pub fn build_report(records: &[DashboardRecord]) -> DashboardsReport {
    build_report_with(records, &SubstringDetector)
}

/// Build the aggregate report with a custom raw query detector.
///
/// Documents are analyzed in parallel and folded in input order.
pub fn build_report_with(
    records: &[DashboardRecord],
    detector: &dyn RawQueryDetector,
) -> DashboardsReport {
    let summaries: Vec<Option<AnalyticsSummary>> = records
        .par_iter()
        .map(|record| match parse_document(&record.data) {
            Ok(document) => Some(analyze_with(&document, detector)),
            Err(e) => {
                warn!(uuid = %record.uuid, error = %e, "Skipping dashboard in analytics report");
                record_document_skipped("report");
                None
            }
        })
        .collect();

    let mut report = DashboardsReport::default();
    for summary in summaries {
        let Some(summary) = summary else {
            report.skipped_documents += 1;
            continue;
        };
        report.total_dashboards += 1;
        if summary.has_panel_and_name {
            report.total_dashboards_with_panel_and_name += 1;
        }
        report.logs_based_panels += summary.logs_based_panels;
        report.traces_based_panels += summary.traces_based_panels;
        report.metric_based_panels += summary.metric_based_panels;
        report.logs_panels_with_attr_contains_op += summary.logs_panels_with_attr_contains_op;
        if summary.uses_logs_raw_query {
            report.dashboards_with_logs_raw_query += 1;
        }
        if summary.uses_traces_raw_query {
            report.dashboards_with_traces_raw_query += 1;
            report
                .dashboard_names_with_traces_raw_query
                .push(summary.title.clone());
        }
        if summary.uses_time_series_v2 {
            report.queries_with_time_series_v2 += 1;
        }
        if summary.uses_tag_attributes {
            report.queries_with_tag_attributes += 1;
        }
        if !summary.title.is_empty() {
            report.dashboard_names.push(summary.title);
        }
    }

    record_documents_analyzed(report.total_dashboards);
    debug!(
        total = report.total_dashboards,
        skipped = report.skipped_documents,
        "Built dashboards report"
    );
    report
}
