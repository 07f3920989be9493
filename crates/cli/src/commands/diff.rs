//! Widget removal preview between two dashboard documents.

use anyhow::Result;
use dashlens_core::MAX_REMOVED_WIDGETS_PER_UPDATE;
use dashlens_core::diff::enforce_removal_limit;
use dashlens_core::{removed_widget_ids, widget_ids};
use std::path::Path;

use super::read_document;
use crate::dispatch::OutputTarget;
use crate::formatters::{DiffOutput, get_formatter, output_result};

/// Print the removed widget ids and the policy verdict.
///
/// A rejected update prints its verdict and then fails with the policy error.
pub fn run(old: &Path, new: &Path, output: &OutputTarget) -> Result<()> {
    let old = read_document(old)?;
    let new = read_document(new)?;

    let removed = removed_widget_ids(&widget_ids(&old), &widget_ids(&new));
    let verdict = enforce_removal_limit(&removed);

    let diff = DiffOutput {
        allowed: verdict.is_ok(),
        removed,
        max_removed: MAX_REMOVED_WIDGETS_PER_UPDATE,
    };
    let rendered = get_formatter(output.format).format_diff(&diff)?;
    output_result(&rendered, output.format, output.file.as_ref())?;

    verdict?;
    Ok(())
}
