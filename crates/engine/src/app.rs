//! Application state and composition.

use std::sync::Arc;

use chrono::Utc;

use crate::api::connections::SessionRegistry;
use crate::config::EngineConfig;
use crate::content::ContentLibrary;
use crate::infrastructure::{GameSnapshot, SnapshotError, SnapshotStore};
use crate::use_cases::{ChatLog, DialogueEngine, PlayerDirectory, QuestEngine};

/// Main application state.
///
/// Owns the content tables, the session registry, the dialogue and quest
/// engines, and the snapshot sink. Lifecycle is tied to process start/stop;
/// handlers receive it via axum state.
pub struct App {
    pub config: EngineConfig,
    pub content: Arc<ContentLibrary>,
    pub sessions: SessionRegistry,
    pub dialogue: DialogueEngine,
    pub quests: QuestEngine,
    pub profiles: PlayerDirectory,
    pub chat: ChatLog,
    snapshots: Arc<dyn SnapshotStore>,
}

impl App {
    pub fn new(config: EngineConfig, snapshots: Arc<dyn SnapshotStore>) -> Self {
        let content = Arc::new(ContentLibrary::ancient_bharat(&config.world_bounds));
        Self {
            sessions: SessionRegistry::new(config.max_sessions),
            dialogue: DialogueEngine::new(content.clone(), config.tuning),
            quests: QuestEngine::new(content.clone()),
            profiles: PlayerDirectory::new(),
            chat: ChatLog::new(config.chat_history_cap),
            content,
            config,
            snapshots,
        }
    }

    /// Restore state from the snapshot sink. Returns whether a snapshot was
    /// found. A missing snapshot is a clean start; a corrupt one is an
    /// error for the caller to report (the engine still starts clean).
    pub async fn restore_snapshot(&self) -> Result<bool, SnapshotError> {
        let Some(blob) = self.snapshots.load().await? else {
            return Ok(false);
        };
        let snapshot: GameSnapshot = serde_json::from_slice(&blob)?;
        self.profiles.import(snapshot.players);
        self.quests.import(snapshot.quests);
        self.dialogue.import(snapshot.memories);
        tracing::info!(saved_at = %snapshot.saved_at, "Snapshot restored");
        Ok(true)
    }

    /// Fold live sessions into the directory and write a snapshot.
    pub async fn save_snapshot(&self) -> Result<(), SnapshotError> {
        for session in self.sessions.list_active().await {
            if let Some(profile) = self.sessions.profile(session.id).await {
                self.profiles.store(session.player.clone(), profile);
            }
        }
        let snapshot = GameSnapshot {
            saved_at: Utc::now(),
            players: self.profiles.export(),
            quests: self.quests.export().await,
            memories: self.dialogue.export().await,
        };
        let blob = serde_json::to_vec_pretty(&snapshot)?;
        self.snapshots.store(blob).await
    }
}
