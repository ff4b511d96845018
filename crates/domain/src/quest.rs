//! Quest definitions and per-player progression.
//!
//! Definitions are immutable content; progress is the per-player state
//! machine `locked -> available -> in_progress -> completed`, monotonic
//! with no regression.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::GameEvent;
use crate::ids::{ItemId, NpcId, ObjectiveId, QuestId};
use crate::region::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestState {
    Locked,
    Available,
    InProgress,
    Completed,
}

impl QuestState {
    pub fn key(&self) -> &'static str {
        match self {
            QuestState::Locked => "locked",
            QuestState::Available => "available",
            QuestState::InProgress => "in_progress",
            QuestState::Completed => "completed",
        }
    }
}

/// Completion predicate for a single objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionRule {
    EnterRegion { region: Region },
    CollectItem { item: ItemId, count: u32 },
    TalkToNpc { npc: NpcId },
    DiscussTopic { topic: String },
}

impl CompletionRule {
    /// How much credit an incoming event contributes toward this rule.
    /// Zero means no match.
    pub fn event_credit(&self, event: &GameEvent) -> u32 {
        match (self, event) {
            (CompletionRule::EnterRegion { region }, GameEvent::RegionEntered { region: entered }) => {
                u32::from(entered == region)
            }
            (
                CompletionRule::CollectItem { item, .. },
                GameEvent::ItemCollected { item: collected, count },
            ) => {
                if collected == item {
                    *count
                } else {
                    0
                }
            }
            (CompletionRule::TalkToNpc { npc }, GameEvent::NpcInteracted { npc: spoken }) => {
                u32::from(spoken == npc)
            }
            (
                CompletionRule::DiscussTopic { topic },
                GameEvent::TopicDiscussed { topic: discussed, .. },
            ) => u32::from(discussed == topic),
            _ => 0,
        }
    }

    /// Credit required to complete the rule.
    pub fn target(&self) -> u32 {
        match self {
            CompletionRule::CollectItem { count, .. } => (*count).max(1),
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestObjective {
    pub id: ObjectiveId,
    pub description: String,
    pub rule: CompletionRule,
}

impl QuestObjective {
    pub fn new(id: impl Into<String>, description: impl Into<String>, rule: CompletionRule) -> Self {
        Self {
            id: ObjectiveId::new(id),
            description: description.into(),
            rule,
        }
    }
}

/// Reward applied by the caller when the quest completes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestReward {
    pub experience: u32,
    pub items: Vec<ItemId>,
    /// Relationship points granted with specific NPCs.
    pub reputation: Vec<(NpcId, u8)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestDefinition {
    pub id: QuestId,
    pub title: String,
    pub description: String,
    pub giver: NpcId,
    pub prerequisites: Vec<QuestId>,
    pub objectives: Vec<QuestObjective>,
    pub reward: QuestReward,
}

/// What one qualifying event did to one quest.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestAdvance {
    /// Partial credit toward a counted objective.
    ObjectiveProgress {
        objective: ObjectiveId,
        current: u32,
        required: u32,
    },
    /// The current objective completed; the quest continues.
    ObjectiveCompleted { objective: ObjectiveId },
    /// The final objective completed; the quest is done.
    QuestCompleted { objective: ObjectiveId },
}

/// Per-(player, quest) progression state. Created when the quest becomes
/// available; never destroyed, never regressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestProgress {
    pub state: QuestState,
    pub objective_index: usize,
    /// Credit accumulated toward the current objective.
    pub progress: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl QuestProgress {
    pub fn available() -> Self {
        Self {
            state: QuestState::Available,
            objective_index: 0,
            progress: 0,
            started_at: None,
            completed_at: None,
        }
    }

    /// Apply one event. At most one objective is completed per event.
    ///
    /// Returns `None` when the event does not qualify (wrong predicate,
    /// quest locked or already completed) - a no-op, never an error.
    pub fn apply_event(
        &mut self,
        definition: &QuestDefinition,
        event: &GameEvent,
        now: DateTime<Utc>,
    ) -> Option<QuestAdvance> {
        if !matches!(self.state, QuestState::Available | QuestState::InProgress) {
            return None;
        }
        let objective = definition.objectives.get(self.objective_index)?;
        let credit = objective.rule.event_credit(event);
        if credit == 0 {
            return None;
        }

        if self.state == QuestState::Available {
            self.state = QuestState::InProgress;
            self.started_at = Some(now);
        }

        self.progress = self.progress.saturating_add(credit);
        let required = objective.rule.target();
        if self.progress < required {
            return Some(QuestAdvance::ObjectiveProgress {
                objective: objective.id.clone(),
                current: self.progress,
                required,
            });
        }

        let completed = objective.id.clone();
        self.objective_index += 1;
        self.progress = 0;
        if self.objective_index >= definition.objectives.len() {
            self.state = QuestState::Completed;
            self.completed_at = Some(now);
            Some(QuestAdvance::QuestCompleted { objective: completed })
        } else {
            Some(QuestAdvance::ObjectiveCompleted { objective: completed })
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == QuestState::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> QuestDefinition {
        QuestDefinition {
            id: QuestId::new("scholars_call"),
            title: "The Scholar's Call".to_string(),
            description: "Seek out the Veda scholar in the great city.".to_string(),
            giver: NpcId::new("rukmini"),
            prerequisites: vec![],
            objectives: vec![
                QuestObjective::new(
                    "travel_to_city",
                    "Travel to Indrapura City",
                    CompletionRule::EnterRegion {
                        region: Region::IndrapuraCity,
                    },
                ),
                QuestObjective::new(
                    "meet_arunima",
                    "Speak with Arunima",
                    CompletionRule::TalkToNpc {
                        npc: NpcId::new("arunima"),
                    },
                ),
            ],
            reward: QuestReward {
                experience: 100,
                ..QuestReward::default()
            },
        }
    }

    #[test]
    fn qualifying_events_advance_in_order() {
        let definition = definition();
        let mut progress = QuestProgress::available();

        // talking first does nothing; the city objective is current
        let advance = progress.apply_event(
            &definition,
            &GameEvent::NpcInteracted {
                npc: NpcId::new("arunima"),
            },
            Utc::now(),
        );
        assert_eq!(advance, None);
        assert_eq!(progress.state, QuestState::Available);

        let advance = progress.apply_event(
            &definition,
            &GameEvent::RegionEntered {
                region: Region::IndrapuraCity,
            },
            Utc::now(),
        );
        assert_eq!(
            advance,
            Some(QuestAdvance::ObjectiveCompleted {
                objective: ObjectiveId::new("travel_to_city"),
            })
        );
        assert_eq!(progress.state, QuestState::InProgress);
        assert_eq!(progress.objective_index, 1);

        let advance = progress.apply_event(
            &definition,
            &GameEvent::NpcInteracted {
                npc: NpcId::new("arunima"),
            },
            Utc::now(),
        );
        assert_eq!(
            advance,
            Some(QuestAdvance::QuestCompleted {
                objective: ObjectiveId::new("meet_arunima"),
            })
        );
        assert!(progress.is_completed());
    }

    #[test]
    fn objective_index_never_regresses() {
        let definition = definition();
        let mut progress = QuestProgress::available();
        let mut highest = 0;
        let events = [
            GameEvent::RegionEntered {
                region: Region::IndrapuraCity,
            },
            GameEvent::RegionEntered {
                region: Region::DustPlains,
            },
            GameEvent::NpcInteracted {
                npc: NpcId::new("devraj"),
            },
            GameEvent::NpcInteracted {
                npc: NpcId::new("arunima"),
            },
            GameEvent::RegionEntered {
                region: Region::IndrapuraCity,
            },
        ];
        for event in &events {
            progress.apply_event(&definition, event, Utc::now());
            assert!(progress.objective_index >= highest);
            highest = progress.objective_index;
        }
    }

    #[test]
    fn completed_quests_ignore_further_events() {
        let definition = definition();
        let mut progress = QuestProgress::available();
        progress.apply_event(
            &definition,
            &GameEvent::RegionEntered {
                region: Region::IndrapuraCity,
            },
            Utc::now(),
        );
        progress.apply_event(
            &definition,
            &GameEvent::NpcInteracted {
                npc: NpcId::new("arunima"),
            },
            Utc::now(),
        );
        assert!(progress.is_completed());
        let completed_at = progress.completed_at;

        let advance = progress.apply_event(
            &definition,
            &GameEvent::RegionEntered {
                region: Region::IndrapuraCity,
            },
            Utc::now(),
        );
        assert_eq!(advance, None);
        assert_eq!(progress.completed_at, completed_at);
    }

    #[test]
    fn counted_objectives_accumulate_partial_credit() {
        let definition = QuestDefinition {
            id: QuestId::new("gather_inscriptions"),
            title: "Deciphering Ancient Scripts".to_string(),
            description: "Collect Sanskrit inscriptions.".to_string(),
            giver: NpcId::new("arunima"),
            prerequisites: vec![],
            objectives: vec![QuestObjective::new(
                "find_inscriptions",
                "Find ancient Sanskrit inscriptions",
                CompletionRule::CollectItem {
                    item: ItemId::new("sanskrit_inscription"),
                    count: 3,
                },
            )],
            reward: QuestReward::default(),
        };
        let mut progress = QuestProgress::available();
        let event = GameEvent::ItemCollected {
            item: ItemId::new("sanskrit_inscription"),
            count: 1,
        };

        assert_eq!(
            progress.apply_event(&definition, &event, Utc::now()),
            Some(QuestAdvance::ObjectiveProgress {
                objective: ObjectiveId::new("find_inscriptions"),
                current: 1,
                required: 3,
            })
        );
        progress.apply_event(&definition, &event, Utc::now());
        assert_eq!(
            progress.apply_event(&definition, &event, Utc::now()),
            Some(QuestAdvance::QuestCompleted {
                objective: ObjectiveId::new("find_inscriptions"),
            })
        );
    }
}
