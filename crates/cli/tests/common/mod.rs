//! Shared test utilities for dashlens integration tests.
//!
//! Invariants / Assumptions:
//! - Every command is hermetic: `DOTENV_DISABLED=1` and no `DASHLENS_*` from the host.
//! - Each test passes its own store directory.

use assert_cmd::Command;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Returns a hermetic `dashlens` command using `store_dir` as its store.
pub fn dashlens_cmd(store_dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dashlens");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env_remove("DASHLENS_USER")
        .env_remove("DASHLENS_LOG_FORMAT")
        .env_remove("RUST_LOG");
    cmd.env("DASHLENS_STORE_DIR", store_dir);

    cmd
}

/// A dashboard document whose widgets have the given ids.
pub fn dashboard(title: &str, ids: &[&str]) -> Value {
    let widgets: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Widget {id}"),
                "query": {
                    "queryType": "builder",
                    "builder": { "queryData": [ {
                        "dataSource": "metrics",
                        "aggregateAttribute": { "key": format!("metric_{id}") }
                    } ] }
                }
            })
        })
        .collect();
    json!({ "title": title, "widgets": widgets })
}

/// Write `document` to `dir/name` and return the path.
pub fn write_document(dir: &Path, name: &str, document: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(document).unwrap()).unwrap();
    path
}

/// Run `create` as a system actor and return the new dashboard's uuid.
#[allow(dead_code)]
pub fn create_dashboard(store_dir: &Path, document: &Value) -> String {
    let file = write_document(store_dir.parent().unwrap_or(store_dir), "create.json", document);
    let output = dashlens_cmd(store_dir)
        .args(["create", "--output", "json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success(), "create failed: {output:?}");
    let created: Value = serde_json::from_slice(&output.stdout).unwrap();
    created["uuid"].as_str().unwrap().to_string()
}
