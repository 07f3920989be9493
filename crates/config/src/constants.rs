//! Centralized constants for the dashlens workspace.

// =============================================================================
// Environment Variables
// =============================================================================

/// Directory holding one JSON file per dashboard.
pub const ENV_STORE_DIR: &str = "DASHLENS_STORE_DIR";

/// Acting user recorded as creator/updater. Unset means a system actor.
pub const ENV_USER: &str = "DASHLENS_USER";

/// Log output format, `text` or `json`.
pub const ENV_LOG_FORMAT: &str = "DASHLENS_LOG_FORMAT";

/// Set to `1` or `true` to skip `.env` loading.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";

// =============================================================================
// Paths
// =============================================================================

/// Application name used for platform directories.
pub const APP_NAME: &str = "dashlens";

/// Subdirectory of the data directory that holds dashboards.
pub const STORE_SUBDIR: &str = "dashboards";

/// Store directory used when no platform data directory can be determined.
pub const FALLBACK_STORE_DIR: &str = "./dashboards";
