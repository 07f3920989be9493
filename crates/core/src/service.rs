//! Dashboard operations over an injected store.
//!
//! Responsibilities:
//! - Create, read, update, delete and lock dashboards.
//! - Enforce the lock flag and the widget removal policy before writes.
//! - Run the analytics report and metric usage lookup over every stored record.
//!
//! Does NOT handle:
//! - Authentication. The acting user is passed in by the caller; `None` means a
//!   system actor that bypasses lock checks.
//!
//! Invariants:
//! - Store errors are propagated unchanged as [`DashboardError::Store`].
//! - Batch operations skip unparsable records; single reads report them.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::analytics::build_report_with;
use crate::classify::{RawQueryDetector, SubstringDetector};
use crate::diff::check_widget_removal;
use crate::document::{Node, parse_document};
use crate::error::{DashboardError, Result};
use crate::metric_usage::index_metric_usage;
use crate::models::{Dashboard, DashboardRecord, DashboardsReport, MetricUsageIndex};
use crate::store::DashboardStore;

/// Check that submitted data is usable as a new dashboard.
///
/// The root must be a mapping with a non-null `title`.
pub fn validate_post_data(data: &Value) -> Result<()> {
    if !data.is_object() {
        return Err(DashboardError::InvalidDocument(
            "dashboard data must be an object".to_string(),
        ));
    }
    if !Node::new(data).key("title").is_present() {
        return Err(DashboardError::InvalidDocument(
            "title not found in post data".to_string(),
        ));
    }
    Ok(())
}

/// Dashboard operations backed by a [`DashboardStore`].
pub struct DashboardService<S> {
    store: S,
    detector: Arc<dyn RawQueryDetector>,
}

impl<S: DashboardStore> DashboardService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            detector: Arc::new(SubstringDetector),
        }
    }

    /// Replace the raw query detector used by the analytics report.
    pub fn with_detector(mut self, detector: impl RawQueryDetector + 'static) -> Self {
        self.detector = Arc::new(detector);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a dashboard. Uses the document's `uuid` when it is a string.
    pub async fn create(&self, data: Value, user: Option<&str>) -> Result<Dashboard> {
        validate_post_data(&data)?;
        let uuid = Node::new(&data)
            .key("uuid")
            .str()
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let mut record =
            DashboardRecord::new(uuid, encode(&data)?, user.map(str::to_string));
        record.id = self.store.insert(record.clone()).await?;

        info!(uuid = %record.uuid, id = record.id, "Created dashboard");
        Ok(Dashboard::from_record(record, data))
    }

    /// Every stored record, including ones whose document no longer parses.
    pub async fn list(&self) -> Result<Vec<DashboardRecord>> {
        Ok(self.store.fetch_all().await?)
    }

    /// Fetch and parse one dashboard.
    pub async fn get(&self, uuid: &str) -> Result<Dashboard> {
        let record = self.fetch_record(uuid).await?;
        let data = parse_document(&record.data)?;
        Ok(Dashboard::from_record(record, data))
    }

    /// Replace a dashboard's document.
    ///
    /// Rejected when the new data is not a mapping, when the dashboard is locked
    /// (for user actors), or when the new document removes more than one widget.
    pub async fn update(&self, uuid: &str, data: Value, user: Option<&str>) -> Result<Dashboard> {
        if !data.is_object() {
            return Err(DashboardError::InvalidDocument(
                "dashboard data must be an object".to_string(),
            ));
        }
        let encoded = encode(&data)?;
        let mut record = self.fetch_record(uuid).await?;
        if user.is_some() && record.locked {
            return Err(DashboardError::Locked(uuid.to_string()));
        }
        let existing = parse_document(&record.data)?;

        let removed = check_widget_removal(&existing, &data)?;
        debug!(uuid, removed = ?removed, "Widget removal within policy");

        record.updated_at = chrono::Utc::now();
        record.updated_by = user.map(str::to_string);
        record.data = encoded;
        if !self.store.update(&record).await? {
            return Err(DashboardError::NotFound(uuid.to_string()));
        }

        info!(uuid, "Updated dashboard");
        Ok(Dashboard::from_record(record, data))
    }

    /// Delete a dashboard. Rejected when it is locked and a user is acting.
    pub async fn delete(&self, uuid: &str, user: Option<&str>) -> Result<()> {
        let record = self.fetch_record(uuid).await?;
        if user.is_some() && record.locked {
            return Err(DashboardError::Locked(uuid.to_string()));
        }
        if !self.store.delete(uuid).await? {
            return Err(DashboardError::NotFound(uuid.to_string()));
        }
        info!(uuid, "Deleted dashboard");
        Ok(())
    }

    /// Lock or unlock a dashboard against user edits.
    pub async fn set_locked(&self, uuid: &str, locked: bool) -> Result<()> {
        if !self.store.set_locked(uuid, locked).await? {
            return Err(DashboardError::NotFound(uuid.to_string()));
        }
        info!(uuid, locked, "Changed dashboard lock");
        Ok(())
    }

    /// Analytics across every stored dashboard.
    pub async fn analytics_report(&self) -> Result<DashboardsReport> {
        let records = self.store.fetch_all().await?;
        Ok(build_report_with(&records, self.detector.as_ref()))
    }

    /// Which dashboards chart each of `metric_names`, and in which widget.
    pub async fn dashboards_with_metric_names<N: AsRef<str>>(
        &self,
        metric_names: &[N],
    ) -> Result<MetricUsageIndex> {
        let records = self.store.fetch_all().await?;
        Ok(index_metric_usage(&records, metric_names))
    }

    async fn fetch_record(&self, uuid: &str) -> Result<DashboardRecord> {
        self.store
            .fetch_one(uuid)
            .await?
            .ok_or_else(|| DashboardError::NotFound(uuid.to_string()))
    }
}

fn encode(data: &Value) -> Result<String> {
    serde_json::to_string(data)
        .map_err(|e| DashboardError::InvalidDocument(format!("failed to serialize data: {e}")))
}
