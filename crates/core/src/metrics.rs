//! Counters for dashboard inspection.
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (install a recorder such as a Prometheus exporter)
//!
//! # Invariants
//! - Recording is infallible and a no-op when no recorder is installed

/// Counter for stored documents skipped by a batch operation because they failed to parse.
pub const METRIC_DOCUMENTS_SKIPPED: &str = "dashlens_documents_skipped_total";

/// Counter for documents run through the analyzer.
pub const METRIC_DOCUMENTS_ANALYZED: &str = "dashlens_documents_analyzed_total";

/// Counter for updates rejected by the widget removal policy.
pub const METRIC_POLICY_REJECTIONS: &str = "dashlens_update_policy_rejections_total";

pub(crate) fn record_document_skipped(operation: &'static str) {
    metrics::counter!(METRIC_DOCUMENTS_SKIPPED,
        "operation" => operation,
    )
    .increment(1);
}

pub(crate) fn record_documents_analyzed(count: usize) {
    metrics::counter!(METRIC_DOCUMENTS_ANALYZED).increment(count as u64);
}

pub(crate) fn record_policy_rejection() {
    metrics::counter!(METRIC_POLICY_REJECTIONS).increment(1);
}
