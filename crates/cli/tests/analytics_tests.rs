//! Integration tests for `report`, `metric-usage`, `analyze` and `diff`.

mod common;

use common::{create_dashboard, dashboard, dashlens_cmd, write_document};
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

fn raw_traces_dashboard() -> Value {
    json!({
        "title": "Trace explorer",
        "widgets": [ {
            "id": "t1",
            "query": {
                "queryType": "clickhouse_sql",
                "clickhouse_sql": [ {
                    "query": "SELECT count() FROM signoz_traces.distributed_signoz_index_v2"
                } ]
            }
        } ]
    })
}

#[test]
fn test_report_skips_corrupt_record() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("store");
    create_dashboard(&store, &dashboard("Hosts", &["w1", "w2"]));
    create_dashboard(&store, &raw_traces_dashboard());
    std::fs::write(
        store.join("broken.json"),
        r#"{"uuid":"broken","created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z","data":"{ nope"}"#,
    )
    .unwrap();

    let output = dashlens_cmd(&store)
        .args(["report", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total_dashboards"], 2);
    assert_eq!(report["skipped_documents"], 1);
    assert_eq!(report["metric_based_panels"], 2);
    assert_eq!(report["dashboards_with_traces_raw_query"], 1);
    assert_eq!(report["dashboard_names_with_traces_raw_query"], json!(["Trace explorer"]));
}

#[test]
fn test_metric_usage_table() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("store");
    let mut document = dashboard("Hosts", &["w1", "w2"]);
    document["uuid"] = json!("hosts");
    create_dashboard(&store, &document);

    dashlens_cmd(&store)
        .args(["metric-usage", "metric_w2", "unused"])
        .assert()
        .success()
        .stdout(predicate::str::contains("metric_w2\thosts\tHosts\tw2\tWidget w2"))
        .stdout(predicate::str::contains("unused").not());
}

#[test]
fn test_analyze_does_not_need_a_store() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_document(temp_dir.path(), "traces.json", &raw_traces_dashboard());

    let output = dashlens_cmd(&temp_dir.path().join("never-created"))
        .args(["analyze", "--output", "json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    let summaries: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summaries[0]["summary"]["uses_traces_raw_query"], true);
    assert!(!temp_dir.path().join("never-created").exists());
}

#[test]
fn test_analyze_reports_bad_files_and_fails() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_document(temp_dir.path(), "good.json", &dashboard("Good", &["w1"]));
    let bad = temp_dir.path().join("bad.json");
    std::fs::write(&bad, "[1, 2").unwrap();

    dashlens_cmd(temp_dir.path())
        .arg("analyze")
        .arg(&good)
        .arg(&bad)
        .assert()
        .code(5)
        .stdout(predicate::str::contains("Title: Good"))
        .stdout(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("1 of 2 files"));
}

#[test]
fn test_diff_verdicts() {
    let temp_dir = TempDir::new().unwrap();
    let old = write_document(temp_dir.path(), "old.json", &dashboard("A", &["w1", "w2", "w3"]));
    let one = write_document(temp_dir.path(), "one.json", &dashboard("A", &["w1", "w3"]));
    let two = write_document(temp_dir.path(), "two.json", &dashboard("A", &["w1"]));

    dashlens_cmd(temp_dir.path())
        .arg("diff")
        .arg(&old)
        .arg(&one)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Widgets: w2"))
        .stdout(predicate::str::contains("Allowed: Yes"));

    let output = dashlens_cmd(temp_dir.path())
        .args(["diff", "--output", "json"])
        .arg(&old)
        .arg(&two)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));
    let diff: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(diff["removed"], json!(["w2", "w3"]));
    assert_eq!(diff["allowed"], false);
}

#[test]
fn test_output_file_is_written() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_document(temp_dir.path(), "a.json", &dashboard("A", &[]));
    let out = temp_dir.path().join("out/summary.json");

    dashlens_cmd(temp_dir.path())
        .args(["analyze", "--output", "json", "--output-file"])
        .arg(&out)
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("Results written to"));

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written[0]["summary"]["title"], "A");
}
