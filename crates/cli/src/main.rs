//! dashlens - Command-line interface for dashboard documents.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Resolve configuration and install the tracing subscriber.
//! - Run the selected command and map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Document inspection or storage (see `crates/core`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap defaults.
//! - Logs go to stderr; stdout carries only command output.

mod args;
mod commands;
mod dispatch;
mod error;
mod formatters;

use args::Cli;
use clap::Parser;
use dashlens_config::{Config, ConfigLoader, LogFormat};
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to build configuration: {:#}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    init_tracing(config.log_format);
    tracing::debug!(store_dir = %config.store_dir.display(), "Configuration resolved");

    let exit_code = match run_command(cli, config).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Environment first, then CLI overrides (highest priority).
fn build_config(cli: &Cli) -> Result<Config, dashlens_config::ConfigError> {
    let mut loader = ConfigLoader::new().from_env()?;

    if let Some(ref dir) = cli.store_dir {
        loader = loader.with_store_dir(dir.clone());
    }
    if let Some(ref user) = cli.user {
        loader = loader.with_user(user.clone());
    }
    if let Some(format) = cli.log_format {
        loader = loader.with_log_format(format);
    }

    loader.build()
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
