//! Command implementations.
//!
//! Shared helpers for reading documents and opening the store live here.

pub mod analyze;
pub mod dashboards;
pub mod diff;
pub mod metric_usage;
pub mod report;

use anyhow::{Context, Result};
use dashlens_config::Config;
use dashlens_core::{DashboardService, FileStore};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Open the file-backed store at the configured directory.
pub(crate) fn open_service(config: &Config) -> DashboardService<FileStore> {
    DashboardService::new(FileStore::new(config.store_dir.clone()))
}

/// Read a file, or stdin when `path` is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Read and parse a dashboard document.
pub(crate) fn read_document(path: &Path) -> Result<Value> {
    let content = read_input(path)?;
    let document = dashlens_core::parse_document(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(document)
}
