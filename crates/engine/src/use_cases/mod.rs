//! Engine use cases: the stateful components behind the coordinator.

pub mod chat;
pub mod dialogue;
pub mod profiles;
pub mod quests;

pub use chat::ChatLog;
pub use dialogue::{
    DialogueEngine, InteractionOutcome, KeywordClassifier, MemoryRecord, TopicClassifier,
};
pub use profiles::PlayerDirectory;
pub use quests::{QuestAdvanceReport, QuestEngine, QuestLogRecord, QuestOverview};
