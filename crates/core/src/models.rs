//! Data models for stored dashboards and derived analytics.
//!
//! Stored records keep the document as the raw blob they were persisted with;
//! parsing happens at read time so that a corrupt blob only affects the
//! operation that touches it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A persisted dashboard row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DashboardRecord {
    #[serde(default)]
    pub id: i64,
    pub uuid: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(rename = "isLocked", default)]
    pub locked: bool,
    /// Serialized dashboard document.
    pub data: String,
}

impl DashboardRecord {
    /// Build an unsaved record stamped with the current time.
    pub fn new(uuid: impl Into<String>, data: impl Into<String>, user: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            uuid: uuid.into(),
            created_at: now,
            created_by: user.clone(),
            updated_at: now,
            updated_by: user,
            locked: false,
            data: data.into(),
        }
    }
}

/// A dashboard with its document parsed.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Dashboard {
    pub id: i64,
    pub uuid: String,
    /// `title` of the document, or empty.
    #[serde(skip)]
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
    #[serde(rename = "isLocked")]
    pub locked: bool,
    pub data: Value,
}

impl Dashboard {
    pub fn from_record(record: DashboardRecord, data: Value) -> Self {
        Self {
            id: record.id,
            uuid: record.uuid,
            title: crate::analytics::dashboard_name(&data).to_string(),
            created_at: record.created_at,
            created_by: record.created_by,
            updated_at: record.updated_at,
            updated_by: record.updated_by,
            locked: record.locked,
            data,
        }
    }
}

/// Per-dashboard analytics computed from a single document.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsSummary {
    pub title: String,
    /// Non-placeholder title and at least one widget.
    pub has_panel_and_name: bool,
    pub logs_based_panels: usize,
    pub traces_based_panels: usize,
    pub metric_based_panels: usize,
    pub logs_panels_with_attr_contains_op: usize,
    pub uses_logs_raw_query: bool,
    pub uses_traces_raw_query: bool,
    pub uses_time_series_v2: bool,
    pub uses_tag_attributes: bool,
}

/// Aggregate analytics across every stored dashboard.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct DashboardsReport {
    pub total_dashboards: usize,
    pub total_dashboards_with_panel_and_name: usize,
    pub dashboard_names: Vec<String>,
    pub logs_based_panels: usize,
    pub traces_based_panels: usize,
    pub metric_based_panels: usize,
    pub logs_panels_with_attr_contains_op: usize,
    pub dashboards_with_logs_raw_query: usize,
    pub dashboards_with_traces_raw_query: usize,
    pub dashboard_names_with_traces_raw_query: Vec<String>,
    pub queries_with_time_series_v2: usize,
    pub queries_with_tag_attributes: usize,
    /// Stored documents excluded because they failed to parse.
    pub skipped_documents: usize,
}

/// One widget that references a metric.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MetricUsage {
    pub dashboard_id: String,
    pub dashboard_title: String,
    pub widget_id: String,
    pub widget_title: String,
}

/// Metric name to the widgets that reference it, in document then widget order.
pub type MetricUsageIndex = BTreeMap<String, Vec<MetricUsage>>;
