//! Persistence collaborator for dashboard records.
//!
//! Responsibilities:
//! - Define the [`DashboardStore`] interface the service is generic over.
//! - Provide an in-memory store for tests and a file-backed store for the CLI.
//!
//! Does NOT handle:
//! - Lock checks, the update-safety policy, or document parsing (see `service`).
//!
//! Invariants:
//! - Stores persist the document blob verbatim; they never interpret it.
//! - `fetch_all` returns records in id order.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;

use std::future::Future;

use crate::error::StoreError;
use crate::models::DashboardRecord;

/// Storage backend for dashboard records, keyed by uuid.
pub trait DashboardStore: Send + Sync {
    /// Every stored record.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<DashboardRecord>, StoreError>> + Send;

    /// The record with `uuid`, if any.
    fn fetch_one(
        &self,
        uuid: &str,
    ) -> impl Future<Output = Result<Option<DashboardRecord>, StoreError>> + Send;

    /// Persist a new record and return its assigned id.
    fn insert(
        &self,
        record: DashboardRecord,
    ) -> impl Future<Output = Result<i64, StoreError>> + Send;

    /// Overwrite `updated_at`, `updated_by` and `data` of the record with the same uuid.
    ///
    /// Returns false if no such record exists.
    fn update(
        &self,
        record: &DashboardRecord,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Delete the record with `uuid`. Returns false if nothing was deleted.
    fn delete(&self, uuid: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Set the lock flag. Returns false if no such record exists.
    fn set_locked(
        &self,
        uuid: &str,
        locked: bool,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}
