//! In-memory dashboard store.

use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::DashboardStore;
use crate::error::StoreError;
use crate::models::DashboardRecord;

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    records: BTreeMap<i64, DashboardRecord>,
}

impl State {
    fn find_mut(&mut self, uuid: &str) -> Option<&mut DashboardRecord> {
        self.records.values_mut().find(|r| r.uuid == uuid)
    }
}

/// Store backed by a map in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with records, assigning ids in order.
    pub async fn with_records(records: impl IntoIterator<Item = DashboardRecord>) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.write().await;
            for mut record in records {
                state.next_id += 1;
                record.id = state.next_id;
                state.records.insert(record.id, record);
            }
        }
        store
    }
}

impl DashboardStore for InMemoryStore {
    async fn fetch_all(&self) -> Result<Vec<DashboardRecord>, StoreError> {
        Ok(self.state.read().await.records.values().cloned().collect())
    }

    async fn fetch_one(&self, uuid: &str) -> Result<Option<DashboardRecord>, StoreError> {
        let state = self.state.read().await;
        Ok(state.records.values().find(|r| r.uuid == uuid).cloned())
    }

    async fn insert(&self, mut record: DashboardRecord) -> Result<i64, StoreError> {
        let mut state = self.state.write().await;
        if state.records.values().any(|r| r.uuid == record.uuid) {
            return Err(StoreError::Conflict(record.uuid));
        }
        state.next_id += 1;
        record.id = state.next_id;
        let id = record.id;
        state.records.insert(id, record);
        Ok(id)
    }

    async fn update(&self, record: &DashboardRecord) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let Some(stored) = state.find_mut(&record.uuid) else {
            return Ok(false);
        };
        stored.updated_at = record.updated_at;
        stored.updated_by = record.updated_by.clone();
        stored.data = record.data.clone();
        Ok(true)
    }

    async fn delete(&self, uuid: &str) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let before = state.records.len();
        state.records.retain(|_, r| r.uuid != uuid);
        Ok(state.records.len() < before)
    }

    async fn set_locked(&self, uuid: &str, locked: bool) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.find_mut(uuid) {
            Some(record) => {
                record.locked = locked;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
