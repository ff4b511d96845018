//! Snapshot format and the JSON-file store.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use horizon_domain::{PlayerId, PlayerProfile};

use super::ports::{SnapshotError, SnapshotStore};
use crate::use_cases::{MemoryRecord, QuestLogRecord};

/// Everything the engine persists between runs. A crash between snapshots
/// loses only the unsaved delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub saved_at: DateTime<Utc>,
    pub players: BTreeMap<PlayerId, PlayerProfile>,
    pub quests: Vec<QuestLogRecord>,
    pub memories: Vec<MemoryRecord>,
}

/// Snapshot store backed by a single JSON file. Writes go through a
/// sibling temp file and a rename so a crash mid-write cannot truncate the
/// previous snapshot.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, SnapshotError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn store(&self, blob: Vec<u8>) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &blob).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_a_clean_start() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("snapshot.json"));
        assert!(store.load().await.expect("load").is_none());
    }

    #[tokio::test]
    async fn store_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("nested/dir/snapshot.json"));

        store.store(b"{\"hello\":1}".to_vec()).await.expect("store");
        let loaded = store.load().await.expect("load").expect("blob present");
        assert_eq!(loaded, b"{\"hello\":1}");

        store.store(b"{\"hello\":2}".to_vec()).await.expect("overwrite");
        let loaded = store.load().await.expect("load").expect("blob present");
        assert_eq!(loaded, b"{\"hello\":2}");
    }
}
