//! Dashboard CRUD and lock commands.
//!
//! Responsibilities:
//! - Create, list, show, update, delete, lock and unlock stored dashboards.
//!
//! Does NOT handle:
//! - Lock checks or the widget removal policy (enforced by `DashboardService`).
//!
//! Invariants:
//! - The configured user is passed through as the acting user; no user means
//!   a system actor.

use anyhow::{Context, Result};
use dashlens_config::Config;
use dashlens_core::{DashboardRecord, dashboard_name, parse_document};
use std::path::PathBuf;
use tracing::info;

use super::{open_service, read_document};
use crate::dispatch::OutputTarget;
use crate::formatters::{DashboardListEntry, StatusOutput, get_formatter, output_result};

/// Dashboard operations routed from the top-level subcommands.
pub enum DashboardCommand {
    Create { file: PathBuf },
    List,
    Get { uuid: String },
    Update { uuid: String, file: PathBuf },
    Delete { uuid: String },
    SetLocked { uuid: String, locked: bool },
}

pub async fn run(config: &Config, command: DashboardCommand, output: &OutputTarget) -> Result<()> {
    let service = open_service(config);
    let user = config.user.as_deref();
    let formatter = get_formatter(output.format);

    let rendered = match command {
        DashboardCommand::Create { file } => {
            let data = read_document(&file)?;
            let dashboard = service
                .create(data, user)
                .await
                .context("Failed to create dashboard")?;
            formatter.format_dashboard(&dashboard)?
        }
        DashboardCommand::List => {
            info!("Listing dashboards");
            let records = service.list().await?;
            let entries: Vec<DashboardListEntry> = records.iter().map(list_entry).collect();
            formatter.format_dashboards(&entries)?
        }
        DashboardCommand::Get { uuid } => {
            let dashboard = service
                .get(&uuid)
                .await
                .with_context(|| format!("Failed to get dashboard {uuid}"))?;
            formatter.format_dashboard(&dashboard)?
        }
        DashboardCommand::Update { uuid, file } => {
            let data = read_document(&file)?;
            let dashboard = service
                .update(&uuid, data, user)
                .await
                .with_context(|| format!("Failed to update dashboard {uuid}"))?;
            formatter.format_dashboard(&dashboard)?
        }
        DashboardCommand::Delete { uuid } => {
            service
                .delete(&uuid, user)
                .await
                .with_context(|| format!("Failed to delete dashboard {uuid}"))?;
            formatter.format_status(&StatusOutput {
                uuid,
                status: "deleted",
            })?
        }
        DashboardCommand::SetLocked { uuid, locked } => {
            service
                .set_locked(&uuid, locked)
                .await
                .with_context(|| format!("Failed to change lock on dashboard {uuid}"))?;
            let status = if locked { "locked" } else { "unlocked" };
            formatter.format_status(&StatusOutput { uuid, status })?
        }
    };

    output_result(&rendered, output.format, output.file.as_ref())
}

fn list_entry(record: &DashboardRecord) -> DashboardListEntry {
    let title = parse_document(&record.data)
        .ok()
        .map(|document| dashboard_name(&document).to_string());
    DashboardListEntry {
        id: record.id,
        uuid: record.uuid.clone(),
        title,
        locked: record.locked,
        updated_at: record.updated_at,
        updated_by: record.updated_by.clone(),
    }
}
