//! Quest progression engine.
//!
//! Definitions come from the content library; per-player logs live here,
//! one async mutex per player so a player's events evaluate strictly in
//! arrival order while different players proceed in parallel.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use horizon_domain::{
    GameEvent, PlayerId, QuestAdvance, QuestId, QuestProgress, QuestReward, QuestState,
};

use crate::content::ContentLibrary;

type QuestLog = BTreeMap<QuestId, QuestProgress>;

/// One quest advanced by one event.
#[derive(Debug, Clone)]
pub struct QuestAdvanceReport {
    pub quest: QuestId,
    pub title: String,
    pub advance: QuestAdvance,
    /// Present when the quest completed; the caller applies it.
    pub reward: Option<QuestReward>,
    /// The quest moved from available to in-progress on this event.
    pub newly_started: bool,
}

/// Summary of one quest for the player-facing quest log.
#[derive(Debug, Clone)]
pub struct QuestOverview {
    pub id: QuestId,
    pub title: String,
    pub description: String,
    pub state: QuestState,
    pub objectives_total: usize,
    pub objectives_completed: usize,
    pub current_objective: Option<String>,
}

/// Serialized form of one player's log for the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestLogRecord {
    pub player: PlayerId,
    pub quests: BTreeMap<QuestId, QuestProgress>,
}

pub struct QuestEngine {
    content: Arc<ContentLibrary>,
    logs: DashMap<PlayerId, Arc<Mutex<QuestLog>>>,
}

impl QuestEngine {
    pub fn new(content: Arc<ContentLibrary>) -> Self {
        Self {
            content,
            logs: DashMap::new(),
        }
    }

    /// Evaluate one event against every quest visible to the player.
    ///
    /// Sequential per player (arrival order); cross-player evaluations run
    /// in parallel. Completions unlock dependent quests before returning.
    pub async fn evaluate_event(
        &self,
        player: &PlayerId,
        event: &GameEvent,
    ) -> Vec<QuestAdvanceReport> {
        let cell = self.log_cell(player);
        let mut log = cell.lock().await;
        self.refresh_availability(&mut log);

        let now = Utc::now();
        let mut reports = Vec::new();
        for definition in &self.content.quests {
            let Some(progress) = log.get_mut(&definition.id) else {
                continue;
            };
            let was_available = progress.state == QuestState::Available;
            if let Some(advance) = progress.apply_event(definition, event, now) {
                let reward = matches!(advance, QuestAdvance::QuestCompleted { .. })
                    .then(|| definition.reward.clone());
                reports.push(QuestAdvanceReport {
                    quest: definition.id.clone(),
                    title: definition.title.clone(),
                    advance,
                    reward,
                    newly_started: was_available,
                });
            }
        }

        // completions unlock dependents for the next event
        self.refresh_availability(&mut log);
        reports
    }

    /// The player's visible quests (available and beyond), catalog order.
    pub async fn visible_quests(&self, player: &PlayerId) -> Vec<QuestOverview> {
        let cell = self.log_cell(player);
        let mut log = cell.lock().await;
        self.refresh_availability(&mut log);

        self.content
            .quests
            .iter()
            .filter_map(|definition| {
                let progress = log.get(&definition.id)?;
                let current_objective = definition
                    .objectives
                    .get(progress.objective_index)
                    .map(|objective| objective.description.clone());
                Some(QuestOverview {
                    id: definition.id.clone(),
                    title: definition.title.clone(),
                    description: definition.description.clone(),
                    state: progress.state,
                    objectives_total: definition.objectives.len(),
                    objectives_completed: progress.objective_index,
                    current_objective,
                })
            })
            .collect()
    }

    /// Owned copy of one player's progress on one quest, if visible.
    pub async fn progress(&self, player: &PlayerId, quest: &QuestId) -> Option<QuestProgress> {
        let cell = self.log_cell(player);
        let log = cell.lock().await;
        log.get(quest).cloned()
    }

    /// Export every player's log for the snapshot.
    pub async fn export(&self) -> Vec<QuestLogRecord> {
        let cells: Vec<(PlayerId, Arc<Mutex<QuestLog>>)> = self
            .logs
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        let mut records = Vec::with_capacity(cells.len());
        for (player, cell) in cells {
            let log = cell.lock().await;
            records.push(QuestLogRecord {
                player,
                quests: log.clone(),
            });
        }
        records
    }

    /// Restore player logs from a snapshot.
    pub fn import(&self, records: Vec<QuestLogRecord>) {
        for record in records {
            self.logs
                .insert(record.player, Arc::new(Mutex::new(record.quests)));
        }
    }

    /// Create `Available` entries for quests whose prerequisites are all in
    /// the player's completed set. Entries are never removed or regressed.
    fn refresh_availability(&self, log: &mut QuestLog) {
        let completed: BTreeSet<QuestId> = log
            .iter()
            .filter(|(_, progress)| progress.is_completed())
            .map(|(id, _)| id.clone())
            .collect();
        for definition in &self.content.quests {
            if log.contains_key(&definition.id) {
                continue;
            }
            if definition
                .prerequisites
                .iter()
                .all(|prerequisite| completed.contains(prerequisite))
            {
                log.insert(definition.id.clone(), QuestProgress::available());
            }
        }
    }

    fn log_cell(&self, player: &PlayerId) -> Arc<Mutex<QuestLog>> {
        self.logs
            .entry(player.clone())
            .or_insert_with(|| Arc::new(Mutex::new(QuestLog::new())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_domain::{ItemId, NpcId, Region, WorldBounds};

    fn engine() -> QuestEngine {
        let content = Arc::new(ContentLibrary::ancient_bharat(&WorldBounds::default()));
        QuestEngine::new(content)
    }

    fn player() -> PlayerId {
        PlayerId::new("p1")
    }

    #[tokio::test]
    async fn entering_indrapura_advances_the_scholars_call() {
        let engine = engine();
        let reports = engine
            .evaluate_event(
                &player(),
                &GameEvent::RegionEntered {
                    region: Region::IndrapuraCity,
                },
            )
            .await;

        let report = reports
            .iter()
            .find(|report| report.quest == QuestId::new("main_001_scholars_call"))
            .expect("scholars call advanced");
        assert!(report.newly_started);
        assert!(matches!(report.advance, QuestAdvance::ObjectiveCompleted { .. }));

        let progress = engine
            .progress(&player(), &QuestId::new("main_001_scholars_call"))
            .await
            .expect("progress exists");
        assert_eq!(progress.state, QuestState::InProgress);
        assert_eq!(progress.objective_index, 1);
    }

    #[tokio::test]
    async fn completion_returns_the_reward_and_unlocks_dependents() {
        let engine = engine();
        let quest = QuestId::new("main_001_scholars_call");
        engine
            .evaluate_event(
                &player(),
                &GameEvent::RegionEntered {
                    region: Region::IndrapuraCity,
                },
            )
            .await;
        let reports = engine
            .evaluate_event(
                &player(),
                &GameEvent::NpcInteracted {
                    npc: NpcId::new("arunima"),
                },
            )
            .await;

        let report = reports
            .iter()
            .find(|report| report.quest == quest)
            .expect("quest completed");
        assert!(matches!(report.advance, QuestAdvance::QuestCompleted { .. }));
        let reward = report.reward.as_ref().expect("completion carries reward");
        assert_eq!(reward.experience, 100);

        // main_002 requires main_001; it should now be visible as available
        let overview = engine.visible_quests(&player()).await;
        let second = overview
            .iter()
            .find(|quest| quest.id == QuestId::new("main_002_first_fragment"))
            .expect("dependent quest visible");
        assert_eq!(second.state, QuestState::Available);
    }

    #[tokio::test]
    async fn locked_quests_ignore_events() {
        let engine = engine();
        // main_002 is locked until main_001 completes
        let reports = engine
            .evaluate_event(
                &player(),
                &GameEvent::RegionEntered {
                    region: Region::DustPlains,
                },
            )
            .await;
        assert!(reports
            .iter()
            .all(|report| report.quest != QuestId::new("main_002_first_fragment")));
        assert!(engine
            .progress(&player(), &QuestId::new("main_002_first_fragment"))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn counted_collection_reports_progress_then_completion() {
        let engine = engine();
        let quest = QuestId::new("side_001_village_rebuild");
        let collect = GameEvent::ItemCollected {
            item: ItemId::new("building_materials"),
            count: 1,
        };

        let first = engine.evaluate_event(&player(), &collect).await;
        assert!(matches!(
            first
                .iter()
                .find(|report| report.quest == quest)
                .expect("progress reported")
                .advance,
            QuestAdvance::ObjectiveProgress { current: 1, required: 3, .. }
        ));

        engine.evaluate_event(&player(), &collect).await;
        let third = engine.evaluate_event(&player(), &collect).await;
        assert!(matches!(
            third
                .iter()
                .find(|report| report.quest == quest)
                .expect("gathering objective done")
                .advance,
            QuestAdvance::ObjectiveCompleted { .. }
        ));

        let done = engine
            .evaluate_event(
                &player(),
                &GameEvent::TopicDiscussed {
                    npc: NpcId::new("rukmini"),
                    topic: "village".to_string(),
                },
            )
            .await;
        assert!(matches!(
            done.iter()
                .find(|report| report.quest == quest)
                .expect("completion reported")
                .advance,
            QuestAdvance::QuestCompleted { .. }
        ));
    }

    #[tokio::test]
    async fn cross_player_logs_are_independent() {
        let engine = Arc::new(engine());
        let event = GameEvent::RegionEntered {
            region: Region::IndrapuraCity,
        };
        let mut handles = Vec::new();
        for i in 0..8 {
            let engine = engine.clone();
            let event = event.clone();
            handles.push(tokio::spawn(async move {
                engine
                    .evaluate_event(&PlayerId::new(format!("p{i}")), &event)
                    .await
            }));
        }
        for handle in handles {
            let reports = handle.await.expect("join");
            assert!(!reports.is_empty());
        }
    }

    #[tokio::test]
    async fn export_import_round_trips() {
        let engine = engine();
        engine
            .evaluate_event(
                &player(),
                &GameEvent::RegionEntered {
                    region: Region::IndrapuraCity,
                },
            )
            .await;

        let records = engine.export().await;
        let restored = self::engine();
        restored.import(records);

        let progress = restored
            .progress(&player(), &QuestId::new("main_001_scholars_call"))
            .await
            .expect("restored progress");
        assert_eq!(progress.state, QuestState::InProgress);
    }
}
