//! File-backed dashboard store.
//!
//! Responsibilities:
//! - Persist one JSON envelope per dashboard at `<root>/<uuid>.json`.
//! - Write atomically (temp file + rename) so a record is never half written.
//!
//! Does NOT handle:
//! - Cross-process locking. Concurrent writers to one directory race.
//!
//! Invariants:
//! - Uuids are restricted to ASCII alphanumerics, `-` and `_` so they are safe
//!   file names.
//! - A corrupt envelope is skipped by `fetch_all` and reported by `fetch_one`.

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::DashboardStore;
use crate::error::StoreError;
use crate::models::DashboardRecord;

const RECORD_EXTENSION: &str = "json";
const CONCURRENT_READS: usize = 16;

/// Store that keeps each record as a file in a directory.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    /// Serializes writers within this process so id assignment stays unique.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, uuid: &str) -> Result<PathBuf, StoreError> {
        let valid = !uuid.is_empty()
            && uuid
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(uuid.to_string()));
        }
        Ok(self.root.join(format!("{uuid}.{RECORD_EXTENSION}")))
    }

    async fn record_paths(&self) -> Result<Vec<PathBuf>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.root, e)),
        };
        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(&self.root, e))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == RECORD_EXTENSION) {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    async fn write_record(&self, record: &DashboardRecord) -> Result<(), StoreError> {
        let path = self.record_path(&record.uuid)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| io_error(&self.root, e))?;

        let content = serde_json::to_string_pretty(record)?;
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(|e| io_error(&temp_path, e))?;
        tokio::fs::rename(&temp_path, &path)
            .await
            .map_err(|e| io_error(&path, e))?;

        debug!(path = %path.display(), "Dashboard record saved atomically");
        Ok(())
    }

    async fn modify(
        &self,
        uuid: &str,
        apply: impl FnOnce(&mut DashboardRecord) + Send,
    ) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let Some(mut record) = self.fetch_one(uuid).await? else {
            return Ok(false);
        };
        apply(&mut record);
        self.write_record(&record).await?;
        Ok(true)
    }
}

async fn read_record(path: &Path) -> Result<Option<DashboardRecord>, StoreError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|_| StoreError::Corrupt {
            path: path.to_path_buf(),
        })
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl DashboardStore for FileStore {
    async fn fetch_all(&self) -> Result<Vec<DashboardRecord>, StoreError> {
        let paths = self.record_paths().await?;
        let results: Vec<(PathBuf, Result<Option<DashboardRecord>, StoreError>)> =
            stream::iter(paths)
                .map(|path| async move {
                    let result = read_record(&path).await;
                    (path, result)
                })
                .buffered(CONCURRENT_READS)
                .collect()
                .await;

        let mut records = Vec::with_capacity(results.len());
        for (path, result) in results {
            match result {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(StoreError::Corrupt { .. }) => {
                    warn!(path = %path.display(), "Skipping corrupt dashboard record");
                }
                Err(e) => return Err(e),
            }
        }
        records.sort_by_key(|r| r.id);
        Ok(records)
    }

    async fn fetch_one(&self, uuid: &str) -> Result<Option<DashboardRecord>, StoreError> {
        let path = self.record_path(uuid)?;
        read_record(&path).await
    }

    async fn insert(&self, mut record: DashboardRecord) -> Result<i64, StoreError> {
        let _guard = self.write_lock.lock().await;
        let path = self.record_path(&record.uuid)?;
        if tokio::fs::try_exists(&path)
            .await
            .map_err(|e| io_error(&path, e))?
        {
            return Err(StoreError::Conflict(record.uuid));
        }

        // Corrupt neighbours are skipped and must not block new dashboards.
        let max_id = self
            .fetch_all()
            .await?
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0);
        record.id = max_id + 1;
        self.write_record(&record).await?;
        Ok(record.id)
    }

    async fn update(&self, record: &DashboardRecord) -> Result<bool, StoreError> {
        let updated_at = record.updated_at;
        let updated_by = record.updated_by.clone();
        let data = record.data.clone();
        self.modify(&record.uuid, move |stored| {
            stored.updated_at = updated_at;
            stored.updated_by = updated_by;
            stored.data = data;
        })
        .await
    }

    async fn delete(&self, uuid: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let path = self.record_path(uuid)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    async fn set_locked(&self, uuid: &str, locked: bool) -> Result<bool, StoreError> {
        self.modify(uuid, move |stored| stored.locked = locked).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("absent"));
        assert!(store.fetch_all().await.unwrap().is_empty());
        assert!(store.fetch_one("abc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_and_fetch_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let first = store
            .insert(DashboardRecord::new("a-1", r#"{"title":"A"}"#, None))
            .await
            .unwrap();
        let second = store
            .insert(DashboardRecord::new("b_2", r#"{"title":"B"}"#, None))
            .await
            .unwrap();
        assert_eq!((first, second), (1, 2));

        let all = store.fetch_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].uuid, "a-1");
        assert_eq!(all[1].data, r#"{"title":"B"}"#);
        assert!(!temp_dir.path().join("a-1.tmp").exists());
    }

    #[tokio::test]
    async fn test_rejects_path_like_uuids() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        for uuid in ["../escape", "a/b", "", "x.json"] {
            let err = store
                .insert(DashboardRecord::new(uuid, "{}", None))
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::InvalidKey(_)), "uuid: {uuid:?}");
        }
    }

    #[tokio::test]
    async fn test_corrupt_record_is_skipped_by_fetch_all() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        store
            .insert(DashboardRecord::new("good", "{}", None))
            .await
            .unwrap();
        std::fs::write(temp_dir.path().join("bad.json"), "{ truncated").unwrap();

        let all = store.fetch_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(matches!(
            store.fetch_one("bad").await,
            Err(StoreError::Corrupt { .. })
        ));

        let id = store
            .insert(DashboardRecord::new("next", "{}", None))
            .await
            .unwrap();
        assert_eq!(id, 2);
    }

    #[tokio::test]
    async fn test_lock_update_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        store
            .insert(DashboardRecord::new("a", "{}", None))
            .await
            .unwrap();

        assert!(store.set_locked("a", true).await.unwrap());
        let mut changed = DashboardRecord::new("a", r#"{"title":"new"}"#, None);
        changed.locked = false;
        assert!(store.update(&changed).await.unwrap());

        let stored = store.fetch_one("a").await.unwrap().unwrap();
        assert!(stored.locked);
        assert_eq!(stored.data, r#"{"title":"new"}"#);

        assert!(store.delete("a").await.unwrap());
        assert!(!store.delete("a").await.unwrap());
        assert!(!store.set_locked("a", false).await.unwrap());
    }
}
