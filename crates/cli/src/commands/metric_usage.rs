//! Metric usage lookup over every stored dashboard.

use anyhow::{Context, Result};
use dashlens_config::Config;
use tracing::info;

use super::open_service;
use crate::dispatch::OutputTarget;
use crate::formatters::{get_formatter, output_result};

pub async fn run(config: &Config, metrics: &[String], output: &OutputTarget) -> Result<()> {
    info!(metrics = ?metrics, "Looking up metric usage");
    let index = open_service(config)
        .dashboards_with_metric_names(metrics)
        .await
        .context("Failed to look up metric usage")?;

    let rendered = get_formatter(output.format).format_metric_usage(&index)?;
    output_result(&rendered, output.format, output.file.as_ref())
}
