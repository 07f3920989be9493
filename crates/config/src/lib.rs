//! Configuration management for dashlens.
//!
//! This crate resolves where dashboards are stored, who is acting, and how
//! logs are formatted, from `.env` files, environment variables and explicit
//! overrides.

pub mod constants;
mod loader;
mod paths;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use paths::default_store_dir;
pub use types::{Config, LogFormat};
