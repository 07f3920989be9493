//! Table formatter implementation.
//!
//! Responsibilities:
//! - Format lists as tab-separated tables and single items as `Key: value` lines.

use anyhow::Result;
use dashlens_core::{AnalyticsSummary, Dashboard, DashboardsReport, MetricUsageIndex};
use std::fmt::Write;

use super::common::format_missing;
use super::{DashboardListEntry, DiffOutput, FileSummary, Formatter, StatusOutput};

/// Table formatter.
pub struct TableFormatter;

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn push_summary(output: &mut String, summary: &AnalyticsSummary) -> Result<()> {
    writeln!(output, "  Title: {}", summary.title)?;
    writeln!(output, "  Has Panel And Name: {}", yes_no(summary.has_panel_and_name))?;
    writeln!(output, "  Logs Panels: {}", summary.logs_based_panels)?;
    writeln!(output, "  Traces Panels: {}", summary.traces_based_panels)?;
    writeln!(output, "  Metric Panels: {}", summary.metric_based_panels)?;
    writeln!(
        output,
        "  Flagged Log Filters: {}",
        summary.logs_panels_with_attr_contains_op
    )?;
    writeln!(output, "  Raw Logs Query: {}", yes_no(summary.uses_logs_raw_query))?;
    writeln!(output, "  Raw Traces Query: {}", yes_no(summary.uses_traces_raw_query))?;
    writeln!(output, "  Uses time_series_v2: {}", yes_no(summary.uses_time_series_v2))?;
    writeln!(output, "  Uses Tag Attributes: {}", yes_no(summary.uses_tag_attributes))?;
    Ok(())
}

impl Formatter for TableFormatter {
    fn format_dashboards(&self, dashboards: &[DashboardListEntry]) -> Result<String> {
        if dashboards.is_empty() {
            return Ok("No dashboards found.".to_string());
        }

        let mut output = String::from("ID\tUUID\tTitle\tLocked\tUpdated At\tUpdated By\n");
        for dashboard in dashboards {
            writeln!(
                output,
                "{}\t{}\t{}\t{}\t{}\t{}",
                dashboard.id,
                dashboard.uuid,
                format_missing(dashboard.title.as_deref()),
                yes_no(dashboard.locked),
                dashboard.updated_at.to_rfc3339(),
                format_missing(dashboard.updated_by.as_deref()),
            )?;
        }
        Ok(output)
    }

    fn format_dashboard(&self, dashboard: &Dashboard) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "ID: {}", dashboard.id)?;
        writeln!(output, "UUID: {}", dashboard.uuid)?;
        writeln!(output, "Title: {}", dashboard.title)?;
        writeln!(output, "Locked: {}", yes_no(dashboard.locked))?;
        writeln!(output, "Created At: {}", dashboard.created_at.to_rfc3339())?;
        writeln!(
            output,
            "Created By: {}",
            format_missing(dashboard.created_by.as_deref())
        )?;
        writeln!(output, "Updated At: {}", dashboard.updated_at.to_rfc3339())?;
        writeln!(
            output,
            "Updated By: {}",
            format_missing(dashboard.updated_by.as_deref())
        )?;
        let widgets = dashboard_widget_count(dashboard);
        writeln!(output, "Widgets: {}", widgets)?;
        Ok(output)
    }

    fn format_status(&self, status: &StatusOutput) -> Result<String> {
        Ok(format!("Dashboard {} {}.", status.uuid, status.status))
    }

    fn format_report(&self, report: &DashboardsReport) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "Total Dashboards: {}", report.total_dashboards)?;
        writeln!(
            output,
            "Dashboards With Panel And Name: {}",
            report.total_dashboards_with_panel_and_name
        )?;
        writeln!(output, "Skipped Documents: {}", report.skipped_documents)?;
        writeln!(output, "Logs Panels: {}", report.logs_based_panels)?;
        writeln!(output, "Traces Panels: {}", report.traces_based_panels)?;
        writeln!(output, "Metric Panels: {}", report.metric_based_panels)?;
        writeln!(
            output,
            "Flagged Log Filters: {}",
            report.logs_panels_with_attr_contains_op
        )?;
        writeln!(
            output,
            "Dashboards With Raw Logs Query: {}",
            report.dashboards_with_logs_raw_query
        )?;
        writeln!(
            output,
            "Dashboards With Raw Traces Query: {}",
            report.dashboards_with_traces_raw_query
        )?;
        writeln!(
            output,
            "Using time_series_v2: {}",
            report.queries_with_time_series_v2
        )?;
        writeln!(
            output,
            "Using Tag Attributes: {}",
            report.queries_with_tag_attributes
        )?;
        if !report.dashboard_names_with_traces_raw_query.is_empty() {
            writeln!(
                output,
                "Raw Traces Dashboards: {}",
                report.dashboard_names_with_traces_raw_query.join(", ")
            )?;
        }
        Ok(output)
    }

    fn format_metric_usage(&self, index: &MetricUsageIndex) -> Result<String> {
        if index.is_empty() {
            return Ok("No dashboards use the given metrics.".to_string());
        }

        let mut output = String::from("Metric\tDashboard\tDashboard Title\tWidget\tWidget Title\n");
        for (metric, usages) in index {
            for usage in usages {
                writeln!(
                    output,
                    "{}\t{}\t{}\t{}\t{}",
                    metric,
                    usage.dashboard_id,
                    usage.dashboard_title,
                    usage.widget_id,
                    usage.widget_title
                )?;
            }
        }
        Ok(output)
    }

    fn format_summaries(&self, summaries: &[FileSummary]) -> Result<String> {
        let mut output = String::new();
        for entry in summaries {
            writeln!(output, "{}:", entry.file)?;
            match (&entry.summary, &entry.error) {
                (Some(summary), _) => push_summary(&mut output, summary)?,
                (None, error) => writeln!(output, "  Error: {}", format_missing(error.as_deref()))?,
            }
        }
        Ok(output)
    }

    fn format_diff(&self, diff: &DiffOutput) -> Result<String> {
        let mut output = String::new();
        if diff.removed.is_empty() {
            writeln!(output, "Removed Widgets: none")?;
        } else {
            writeln!(output, "Removed Widgets: {}", diff.removed.join(", "))?;
        }
        writeln!(
            output,
            "Allowed: {} (at most {} removal per update)",
            yes_no(diff.allowed),
            diff.max_removed
        )?;
        Ok(output)
    }
}

fn dashboard_widget_count(dashboard: &Dashboard) -> usize {
    dashlens_core::walk(&dashboard.data).count()
}
