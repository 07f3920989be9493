//! Store-less analysis of dashboard files.
//!
//! Responsibilities:
//! - Summarize each file independently; one bad file does not stop the rest.
//!
//! Invariants:
//! - The command fails with `InvalidDocument` after printing if any file
//!   could not be read or parsed.

use anyhow::Result;
use dashlens_core::{DashboardError, analyze};
use std::path::PathBuf;
use tracing::warn;

use super::read_document;
use crate::dispatch::OutputTarget;
use crate::formatters::{FileSummary, get_formatter, output_result};

pub fn run(files: &[PathBuf], output: &OutputTarget) -> Result<()> {
    let summaries: Vec<FileSummary> = files.iter().map(|path| summarize(path)).collect();

    let rendered = get_formatter(output.format).format_summaries(&summaries)?;
    output_result(&rendered, output.format, output.file.as_ref())?;

    let failed = summaries.iter().filter(|s| s.error.is_some()).count();
    if failed > 0 {
        return Err(DashboardError::InvalidDocument(format!(
            "{failed} of {} files could not be analyzed",
            summaries.len()
        ))
        .into());
    }
    Ok(())
}

fn summarize(path: &std::path::Path) -> FileSummary {
    let file = path.display().to_string();
    match read_document(path) {
        Ok(document) => FileSummary {
            file,
            summary: Some(analyze(&document)),
            error: None,
        },
        Err(e) => {
            warn!(file = %file, error = %e, "Skipping file");
            FileSummary {
                file,
                summary: None,
                error: Some(format!("{e:#}")),
            }
        }
    }
}
