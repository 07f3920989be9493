//! Environment variable parsing for configuration.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.
//! - Unparsable values return `ConfigError::InvalidValue`.

use std::path::PathBuf;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{ENV_LOG_FORMAT, ENV_STORE_DIR, ENV_USER};
use crate::types::LogFormat;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(dir) = env_var_or_none(ENV_STORE_DIR) {
        loader.set_store_dir(Some(PathBuf::from(dir)));
    }
    if let Some(user) = env_var_or_none(ENV_USER) {
        loader.set_user(Some(user));
    }
    if let Some(format) = env_var_or_none(ENV_LOG_FORMAT) {
        let format: LogFormat = format
            .parse()
            .map_err(|message| ConfigError::InvalidValue {
                var: ENV_LOG_FORMAT.to_string(),
                message,
            })?;
        loader.set_log_format(Some(format));
    }
    Ok(())
}
