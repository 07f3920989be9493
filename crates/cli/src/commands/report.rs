//! Analytics report over every stored dashboard.

use anyhow::{Context, Result};
use dashlens_config::Config;

use super::open_service;
use crate::dispatch::OutputTarget;
use crate::formatters::{get_formatter, output_result};

pub async fn run(config: &Config, output: &OutputTarget) -> Result<()> {
    let report = open_service(config)
        .analytics_report()
        .await
        .context("Failed to build analytics report")?;

    if report.skipped_documents > 0 {
        tracing::warn!(
            skipped = report.skipped_documents,
            "Some stored dashboards could not be parsed"
        );
    }

    let rendered = get_formatter(output.format).format_report(&report)?;
    output_result(&rendered, output.format, output.file.as_ref())
}
