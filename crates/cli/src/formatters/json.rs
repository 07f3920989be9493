//! JSON formatter implementation.
//!
//! Every result is pretty-printed with serde; the JSON shape is the model's
//! serde shape.

use anyhow::Result;
use dashlens_core::{Dashboard, DashboardsReport, MetricUsageIndex};

use super::{DashboardListEntry, DiffOutput, FileSummary, Formatter, StatusOutput};

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_dashboards(&self, dashboards: &[DashboardListEntry]) -> Result<String> {
        Ok(serde_json::to_string_pretty(dashboards)?)
    }

    fn format_dashboard(&self, dashboard: &Dashboard) -> Result<String> {
        Ok(serde_json::to_string_pretty(dashboard)?)
    }

    fn format_status(&self, status: &StatusOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(status)?)
    }

    fn format_report(&self, report: &DashboardsReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn format_metric_usage(&self, index: &MetricUsageIndex) -> Result<String> {
        Ok(serde_json::to_string_pretty(index)?)
    }

    fn format_summaries(&self, summaries: &[FileSummary]) -> Result<String> {
        Ok(serde_json::to_string_pretty(summaries)?)
    }

    fn format_diff(&self, diff: &DiffOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(diff)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_is_empty_array() {
        let output = JsonFormatter.format_dashboards(&[]).unwrap();
        assert_eq!(output, "[]");
    }

    #[test]
    fn test_summary_error_omits_summary() {
        let output = JsonFormatter
            .format_summaries(&[FileSummary {
                file: "bad.json".to_string(),
                summary: None,
                error: Some("not JSON".to_string()),
            }])
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["error"], "not JSON");
        assert!(value[0].get("summary").is_none());
    }
}
