//! Dashboard document inspection and storage.
//!
//! This crate reads loosely typed dashboard JSON documents, classifies the
//! queries inside their widgets, enforces the widget-removal policy on
//! updates, and aggregates analytics and metric usage across many dashboards.
//! Persistence is abstracted behind [`DashboardStore`].

pub mod analytics;
pub mod classify;
pub mod diff;
pub mod document;
pub mod error;
pub mod metric_usage;
pub mod metrics;
pub mod models;
pub mod service;
pub mod store;
pub mod widgets;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use analytics::{analyze, analyze_with, build_report, build_report_with, dashboard_name};
pub use classify::{
    DataSource, QueryDialect, RawDialectSignals, RawQueryDetector, SubstringDetector,
    classify_query,
};
pub use diff::{MAX_REMOVED_WIDGETS_PER_UPDATE, check_widget_removal, removed_widget_ids};
pub use document::{Node, parse_document};
pub use error::{DashboardError, Result, StoreError};
pub use metric_usage::index_metric_usage;
pub use models::{
    AnalyticsSummary, Dashboard, DashboardRecord, DashboardsReport, MetricUsage, MetricUsageIndex,
};
pub use service::{DashboardService, validate_post_data};
pub use store::{DashboardStore, FileStore, InMemoryStore};
pub use widgets::{Widget, walk, widget_ids};
