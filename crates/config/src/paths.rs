//! Platform path helpers.
//!
//! Responsibilities:
//! - Determine the default dashboard store directory with `directories`.
//!
//! Does NOT handle:
//! - Creating the directory. The store does that on first write.

use std::path::PathBuf;

use crate::constants::{APP_NAME, FALLBACK_STORE_DIR, STORE_SUBDIR};

/// Returns the default dashboard store directory.
///
/// - Linux: `~/.local/share/dashlens/dashboards`
/// - macOS: `~/Library/Application Support/dashlens/dashboards`
/// - Windows: `%AppData%\dashlens\data\dashboards`
///
/// Falls back to `./dashboards` when no home directory is available.
pub fn default_store_dir() -> PathBuf {
    match directories::ProjectDirs::from("", "", APP_NAME) {
        Some(dirs) => dirs.data_dir().join(STORE_SUBDIR),
        None => {
            tracing::debug!("No platform data directory, using {FALLBACK_STORE_DIR}");
            PathBuf::from(FALLBACK_STORE_DIR)
        }
    }
}
