//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Collect optional values from the environment and direct builder methods.
//! - Fill in defaults and build the final `Config`.
//!
//! Invariants / Assumptions:
//! - Later calls win, so callers apply `from_env()` before CLI overrides.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::path::PathBuf;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::ENV_DOTENV_DISABLED;
use crate::paths::default_store_dir;
use crate::types::{Config, LogFormat};

/// Configuration loader that builds config from the environment and overrides.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    store_dir: Option<PathBuf>,
    user: Option<String>,
    log_format: Option<LogFormat>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(ENV_DOTENV_DISABLED).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// Skipped entirely when `DOTENV_DISABLED` is `true` or `1`. A missing
    /// file is not an error.
    ///
    /// # Errors
    ///
    /// - `ConfigError::DotenvParse` if the file has invalid syntax.
    /// - `ConfigError::DotenvIo` if the file exists but cannot be read.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the store directory.
    pub fn with_store_dir(mut self, dir: PathBuf) -> Self {
        self.store_dir = Some(dir);
        self
    }

    /// Set the acting user.
    pub fn with_user(mut self, user: String) -> Self {
        self.user = Some(user);
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = Some(format);
        self
    }

    pub(crate) fn set_store_dir(&mut self, dir: Option<PathBuf>) {
        self.store_dir = dir;
    }

    pub(crate) fn set_user(&mut self, user: Option<String>) {
        self.user = user;
    }

    pub(crate) fn set_log_format(&mut self, format: Option<LogFormat>) {
        self.log_format = format;
    }

    /// Build the final configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the acting user is blank.
    pub fn build(self) -> Result<Config, ConfigError> {
        let user = match self.user {
            Some(user) if user.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "user".to_string(),
                    message: "must not be blank".to_string(),
                });
            }
            other => other,
        };

        Ok(Config {
            store_dir: self.store_dir.unwrap_or_else(default_store_dir),
            user,
            log_format: self.log_format.unwrap_or_default(),
        })
    }
}
