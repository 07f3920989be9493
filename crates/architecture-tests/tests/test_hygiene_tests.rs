//! Static checks on test sources.
//!
//! Invariants:
//! - Temp files and dirs come from `tempfile` RAII types, never `std::env::temp_dir()`
//!   or hardcoded `/tmp` paths.
//! - CLI integration tests build commands through the hermetic helper in
//!   `tests/common`, so a developer's `.env` or `DASHLENS_*` never leaks in.

mod common;

use common::{find_workspace_root, is_test_file, workspace_rust_files};
use std::fs;

#[test]
fn test_no_manual_temp_paths() {
    let root = find_workspace_root();
    let mut violations = Vec::new();

    for path in workspace_rust_files(&root) {
        let content = fs::read_to_string(&path).unwrap_or_default();
        if !content.contains("#[test]") && !content.contains("#[tokio::test]") {
            continue;
        }
        if content.contains("std::env::temp_dir()") {
            violations.push(format!("{}: uses std::env::temp_dir()", path.display()));
        }
        if content.contains("\"/tmp") {
            violations.push(format!("{}: hardcoded /tmp path", path.display()));
        }
    }

    assert!(
        violations.is_empty(),
        "Use the tempfile crate instead:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_cli_tests_use_hermetic_command() {
    let root = find_workspace_root();
    let cli_tests = root.join("crates/cli/tests");
    let mut violations = Vec::new();

    for path in workspace_rust_files(&root) {
        if !path.starts_with(&cli_tests) || !is_test_file(&path) {
            continue;
        }
        if path.starts_with(cli_tests.join("common")) {
            continue;
        }
        let content = fs::read_to_string(&path).unwrap_or_default();
        if content.contains("cargo_bin_cmd!") || content.contains("Command::cargo_bin") {
            violations.push(path.display().to_string());
        }
    }

    assert!(
        violations.is_empty(),
        "Build CLI commands with common::dashlens_cmd():\n{}",
        violations.join("\n")
    );
}
