//! Ports to external dependencies.
//!
//! The snapshot sink is the engine's only durability point. It deals in
//! opaque blobs so the storage backend stays format-agnostic.

use async_trait::async_trait;

/// Persistence sink for periodic game-state snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the last stored blob. `None` means a clean start.
    async fn load(&self) -> Result<Option<Vec<u8>>, SnapshotError>;

    /// Replace the stored blob.
    async fn store(&self, blob: Vec<u8>) -> Result<(), SnapshotError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// In-memory store for tests and ephemeral deployments.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    blob: tokio::sync::Mutex<Option<Vec<u8>>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, SnapshotError> {
        Ok(self.blob.lock().await.clone())
    }

    async fn store(&self, blob: Vec<u8>) -> Result<(), SnapshotError> {
        *self.blob.lock().await = Some(blob);
        Ok(())
    }
}
