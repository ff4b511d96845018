//! NPC dialogue engine.
//!
//! Stateless content (NPC definitions, templates) comes from the content
//! library; per-(NPC, player) conversation memory lives here, one async
//! mutex per key so concurrent interactions with the same pair serialize
//! while different pairs proceed in parallel.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use horizon_domain::{
    ConversationMemory, DialogueTuning, FamiliarityTier, NpcDefinition, NpcId, PlayerId,
};

use crate::content::ContentLibrary;

/// Topic classification strategy. The keyword matcher is the default; the
/// trait seam exists so the policy can be swapped or tested independently
/// of response generation.
pub trait TopicClassifier: Send + Sync {
    /// Matched topic tags in the NPC's priority order.
    fn classify(&self, input: &str, npc: &NpcDefinition) -> Vec<String>;
}

/// Case-insensitive substring matching against each topic's keyword list.
pub struct KeywordClassifier;

impl TopicClassifier for KeywordClassifier {
    fn classify(&self, input: &str, npc: &NpcDefinition) -> Vec<String> {
        let lowered = input.to_lowercase();
        npc.topics
            .iter()
            .filter(|topic| {
                topic
                    .keywords
                    .iter()
                    .any(|keyword| lowered.contains(&keyword.to_lowercase()))
            })
            .map(|topic| topic.tag.clone())
            .collect()
    }
}

/// The result of one interaction.
#[derive(Debug, Clone)]
pub struct InteractionOutcome {
    pub npc: NpcId,
    pub response: String,
    /// All matched topics, highest priority first.
    pub topics: Vec<String>,
    /// Familiarity tier the response was selected for.
    pub tier: FamiliarityTier,
}

/// Serialized form of one memory entry for the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub npc: NpcId,
    pub player: PlayerId,
    pub memory: ConversationMemory,
}

pub struct DialogueEngine {
    content: Arc<ContentLibrary>,
    tuning: DialogueTuning,
    classifier: Box<dyn TopicClassifier>,
    memories: DashMap<(NpcId, PlayerId), Arc<Mutex<ConversationMemory>>>,
}

impl DialogueEngine {
    pub fn new(content: Arc<ContentLibrary>, tuning: DialogueTuning) -> Self {
        Self::with_classifier(content, tuning, Box::new(KeywordClassifier))
    }

    pub fn with_classifier(
        content: Arc<ContentLibrary>,
        tuning: DialogueTuning,
        classifier: Box<dyn TopicClassifier>,
    ) -> Self {
        Self {
            content,
            tuning,
            classifier,
            memories: DashMap::new(),
        }
    }

    /// Handle one player utterance.
    ///
    /// Returns `None` for an unknown NPC - a no-op, never an error. Empty
    /// input still produces the generic fallback and still counts as an
    /// interaction.
    pub async fn interact(
        &self,
        npc_id: &NpcId,
        player: &PlayerId,
        input: &str,
        player_level: u32,
    ) -> Option<InteractionOutcome> {
        let npc = self.content.npcs.get(npc_id)?;

        let cell = self.memory_cell(npc_id, player);
        let mut memory = cell.lock().await;

        let topics = self.classifier.classify(input, npc);
        let tier = self.tuning.tier(memory.relationship);

        let body = match topics.first().and_then(|tag| npc.topic(tag)) {
            Some(topic) if player_level < topic.min_level => topic
                .novice_caution
                .clone()
                .unwrap_or_else(|| pick(topic.responses.for_tier(tier), memory.interactions)),
            Some(topic) => pick(topic.responses.for_tier(tier), memory.interactions),
            None => pick(npc.fallback.for_tier(tier), memory.interactions),
        };
        let response = npc.personality.embellish(&body);

        for tag in &topics {
            if let Some(signal) = npc.topic(tag).and_then(|topic| topic.preference.as_deref()) {
                memory.record_preference(signal);
            }
        }
        memory.record(&topics, &self.tuning, Utc::now());

        Some(InteractionOutcome {
            npc: npc_id.clone(),
            response,
            topics,
            tier,
        })
    }

    /// Apply a quest reputation reward to the pair's relationship score.
    pub async fn bump_relationship(&self, npc_id: &NpcId, player: &PlayerId, amount: u8) {
        let cell = self.memory_cell(npc_id, player);
        let mut memory = cell.lock().await;
        memory.bump_relationship(amount, &self.tuning);
    }

    /// Owned copy of one pair's memory, if any.
    pub async fn memory(&self, npc_id: &NpcId, player: &PlayerId) -> Option<ConversationMemory> {
        let cell = self
            .memories
            .get(&(npc_id.clone(), player.clone()))
            .map(|entry| entry.value().clone())?;
        let memory = cell.lock().await;
        Some(memory.clone())
    }

    /// Export every memory entry for the snapshot.
    pub async fn export(&self) -> Vec<MemoryRecord> {
        // collect the cells first so no shard lock is held across an await
        let cells: Vec<((NpcId, PlayerId), Arc<Mutex<ConversationMemory>>)> = self
            .memories
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        let mut records = Vec::with_capacity(cells.len());
        for ((npc, player), cell) in cells {
            let memory = cell.lock().await;
            records.push(MemoryRecord {
                npc,
                player,
                memory: memory.clone(),
            });
        }
        records
    }

    /// Restore memory entries from a snapshot.
    pub fn import(&self, records: Vec<MemoryRecord>) {
        for record in records {
            self.memories.insert(
                (record.npc, record.player),
                Arc::new(Mutex::new(record.memory)),
            );
        }
    }

    fn memory_cell(&self, npc_id: &NpcId, player: &PlayerId) -> Arc<Mutex<ConversationMemory>> {
        self.memories
            .entry((npc_id.clone(), player.clone()))
            .or_insert_with(|| Arc::new(Mutex::new(ConversationMemory::new(Utc::now()))))
            .clone()
    }
}

/// Rotate through the variants so repeat questions do not repeat verbatim.
fn pick(variants: &[String], counter: u64) -> String {
    if variants.is_empty() {
        return String::new();
    }
    variants[counter as usize % variants.len()].clone()
}
