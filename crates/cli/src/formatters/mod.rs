//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide JSON and table output for every command result.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings, see `output_result`).
//!
//! Invariants:
//! - Tables use tab-separation for consistent alignment in standard terminals.
//! - Empty JSON results are valid empty structures; empty tables print a message.
//! - Missing values render as `N/A` in tables and `null` in JSON.

use anyhow::Result;
use chrono::{DateTime, Utc};
use dashlens_core::{AnalyticsSummary, Dashboard, DashboardsReport, MetricUsageIndex};
use serde::Serialize;

mod common;
mod json;
mod table;

pub use common::output_result;
pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: json, table", s),
        }
    }
}

/// One row of `list`. The title is read from the stored document when it parses.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardListEntry {
    pub id: i64,
    pub uuid: String,
    pub title: Option<String>,
    #[serde(rename = "isLocked")]
    pub locked: bool,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
}

/// Outcome of a state-changing command that has no document to show.
#[derive(Debug, Clone, Serialize)]
pub struct StatusOutput {
    pub uuid: String,
    pub status: &'static str,
}

/// Summary of one file given to `analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<AnalyticsSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of `diff`.
#[derive(Debug, Clone, Serialize)]
pub struct DiffOutput {
    pub removed: Vec<String>,
    pub allowed: bool,
    pub max_removed: usize,
}

/// Formatter trait for command results.
pub trait Formatter {
    fn format_dashboards(&self, dashboards: &[DashboardListEntry]) -> Result<String>;

    fn format_dashboard(&self, dashboard: &Dashboard) -> Result<String>;

    fn format_status(&self, status: &StatusOutput) -> Result<String>;

    fn format_report(&self, report: &DashboardsReport) -> Result<String>;

    fn format_metric_usage(&self, index: &MetricUsageIndex) -> Result<String>;

    fn format_summaries(&self, summaries: &[FileSummary]) -> Result<String>;

    fn format_diff(&self, diff: &DiffOutput) -> Result<String>;
}

/// Get a formatter for the specified output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}
