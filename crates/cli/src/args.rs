//! CLI argument definitions and parsing.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not resolve defaults (see `dashlens_config::ConfigLoader`).

use clap::{Parser, Subcommand};
use dashlens_config::LogFormat;
use dashlens_config::constants::{ENV_LOG_FORMAT, ENV_STORE_DIR, ENV_USER};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dashlens")]
#[command(about = "dashlens - Store, inspect and analyze dashboard documents", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  dashlens create dashboard.json\n  dashlens --user me@example.com update <UUID> dashboard.json\n  dashlens report --output json\n  dashlens metric-usage system_cpu_time system_memory_usage\n  dashlens analyze exported/*.json\n  dashlens diff before.json after.json\n"
)]
pub struct Cli {
    /// Directory of the dashboard store
    #[arg(long, global = true, env = ENV_STORE_DIR, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Acting user. Omit to act as the system, which bypasses dashboard locks
    #[arg(long, global = true, env = ENV_USER)]
    pub user: Option<String>,

    /// Log format on stderr (text, json)
    #[arg(long, global = true, env = ENV_LOG_FORMAT)]
    pub log_format: Option<LogFormat>,

    /// Output format (json, table)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Output file path (saves results to file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a dashboard from a JSON document ("-" reads stdin)
    Create {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List stored dashboards
    List,

    /// Show a dashboard
    Get { uuid: String },

    /// Replace a dashboard's document ("-" reads stdin)
    Update {
        uuid: String,
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Delete a dashboard
    Delete { uuid: String },

    /// Lock a dashboard against user edits
    Lock { uuid: String },

    /// Unlock a dashboard
    Unlock { uuid: String },

    /// Aggregate analytics across every stored dashboard
    Report,

    /// Find the widgets that chart the given metrics
    MetricUsage {
        #[arg(required = true, value_name = "METRIC")]
        metrics: Vec<String>,
    },

    /// Summarize dashboard documents on disk without a store
    Analyze {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Show which widgets an update would remove and whether it is allowed
    Diff {
        #[arg(value_name = "OLD")]
        old: PathBuf,
        #[arg(value_name = "NEW")]
        new: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dashlens",
            "report",
            "--output",
            "json",
            "--log-format",
            "JSON",
            "--store-dir",
            "store/d",
        ])
        .unwrap();
        assert_eq!(cli.output, "json");
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert_eq!(cli.store_dir, Some(PathBuf::from("store/d")));
        assert!(matches!(cli.command, Commands::Report));
    }

    #[test]
    fn test_metric_usage_requires_names() {
        assert!(Cli::try_parse_from(["dashlens", "metric-usage"]).is_err());
        let cli = Cli::try_parse_from(["dashlens", "metric-usage", "a", "b"]).unwrap();
        match cli.command {
            Commands::MetricUsage { metrics } => assert_eq!(metrics, vec!["a", "b"]),
            _ => panic!("expected metric-usage"),
        }
    }
}
