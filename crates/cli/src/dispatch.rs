//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Invariants:
//! - Store-backed commands share one `FileStore` rooted at the configured directory.
//! - `analyze` and `diff` never touch the store.

use anyhow::Result;
use dashlens_config::Config;

use crate::args::{Cli, Commands};
use crate::commands::{self, dashboards::DashboardCommand};
use crate::formatters::OutputFormat;

/// Where and how a command writes its result.
pub(crate) struct OutputTarget {
    pub format: OutputFormat,
    pub file: Option<std::path::PathBuf>,
}

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(cli: Cli, config: Config) -> Result<()> {
    let output = OutputTarget {
        format: OutputFormat::from_str(&cli.output)?,
        file: cli.output_file,
    };

    match cli.command {
        Commands::Create { file } => {
            commands::dashboards::run(&config, DashboardCommand::Create { file }, &output).await?;
        }
        Commands::List => {
            commands::dashboards::run(&config, DashboardCommand::List, &output).await?;
        }
        Commands::Get { uuid } => {
            commands::dashboards::run(&config, DashboardCommand::Get { uuid }, &output).await?;
        }
        Commands::Update { uuid, file } => {
            commands::dashboards::run(&config, DashboardCommand::Update { uuid, file }, &output)
                .await?;
        }
        Commands::Delete { uuid } => {
            commands::dashboards::run(&config, DashboardCommand::Delete { uuid }, &output).await?;
        }
        Commands::Lock { uuid } => {
            let command = DashboardCommand::SetLocked { uuid, locked: true };
            commands::dashboards::run(&config, command, &output).await?;
        }
        Commands::Unlock { uuid } => {
            let command = DashboardCommand::SetLocked {
                uuid,
                locked: false,
            };
            commands::dashboards::run(&config, command, &output).await?;
        }
        Commands::Report => {
            commands::report::run(&config, &output).await?;
        }
        Commands::MetricUsage { metrics } => {
            commands::metric_usage::run(&config, &metrics, &output).await?;
        }
        Commands::Analyze { files } => {
            commands::analyze::run(&files, &output)?;
        }
        Commands::Diff { old, new } => {
            commands::diff::run(&old, &new, &output)?;
        }
    }

    Ok(())
}
