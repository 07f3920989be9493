//! Testing utilities for dashboard inspection tests.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use dashlens_core::testing::{load_fixture, strategies::arb_dashboard};
//!
//! let document = load_fixture("builder_logs.json");
//! ```

pub mod strategies;

use std::path::Path;

use crate::models::DashboardRecord;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    serde_json::from_str(&load_fixture_raw(fixture_path)).expect("Invalid JSON in fixture")
}

/// Load a fixture file verbatim, for blobs that are not meant to parse.
///
/// # Panics
/// If the fixture file cannot be read.
pub fn load_fixture_raw(fixture_path: &str) -> String {
    let full_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path);
    std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()))
}

/// Build an unsaved record whose blob is the fixture's content.
pub fn fixture_record(uuid: &str, fixture_path: &str) -> DashboardRecord {
    DashboardRecord::new(uuid, load_fixture_raw(fixture_path), None)
}
