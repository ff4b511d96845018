//! Conversation memory: per (NPC, player) relationship and topic history.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tunable dialogue constants. The exact band boundaries are configuration;
/// correctness only depends on the saturating/monotonic properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTuning {
    /// Relationship score at which an NPC treats the player as familiar.
    pub familiar_threshold: u8,
    /// Relationship score at which an NPC treats the player as trusted.
    pub trusted_threshold: u8,
    /// Score gained per interaction.
    pub score_delta: u8,
    /// Upper bound for the relationship score.
    pub max_score: u8,
    /// Maximum retained topic-log entries; oldest are evicted past this.
    pub topic_log_cap: usize,
}

impl Default for DialogueTuning {
    fn default() -> Self {
        Self {
            familiar_threshold: 20,
            trusted_threshold: 60,
            score_delta: 2,
            max_score: 100,
            topic_log_cap: 32,
        }
    }
}

/// Familiarity bands derived from the relationship score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamiliarityTier {
    Stranger,
    Familiar,
    Trusted,
}

impl DialogueTuning {
    pub fn tier(&self, score: u8) -> FamiliarityTier {
        if score >= self.trusted_threshold {
            FamiliarityTier::Trusted
        } else if score >= self.familiar_threshold {
            FamiliarityTier::Familiar
        } else {
            FamiliarityTier::Stranger
        }
    }
}

/// What one NPC remembers about one player. Created on first interaction,
/// mutated on every subsequent one, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMemory {
    /// Bounded relationship score; saturating, never wrapping.
    pub relationship: u8,
    /// Ordered log of topics discussed, oldest first, bounded by the cap.
    pub topics_discussed: VecDeque<String>,
    /// Accumulated preference signals and how often each was expressed.
    pub preferences: BTreeMap<String, u32>,
    /// Total interactions, including ones that matched no topic.
    pub interactions: u64,
    pub first_interaction: DateTime<Utc>,
    pub last_interaction: DateTime<Utc>,
}

impl ConversationMemory {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            relationship: 0,
            topics_discussed: VecDeque::new(),
            preferences: BTreeMap::new(),
            interactions: 0,
            first_interaction: now,
            last_interaction: now,
        }
    }

    /// Record one interaction: append the matched topics (bounded), bump the
    /// relationship score (saturating at the cap), advance the counters.
    /// An interaction with no matched topics still counts.
    pub fn record(&mut self, topics: &[String], tuning: &DialogueTuning, now: DateTime<Utc>) {
        for topic in topics {
            self.topics_discussed.push_back(topic.clone());
            while self.topics_discussed.len() > tuning.topic_log_cap {
                self.topics_discussed.pop_front();
            }
        }
        self.relationship = self
            .relationship
            .saturating_add(tuning.score_delta)
            .min(tuning.max_score);
        self.interactions += 1;
        self.last_interaction = now;
    }

    /// Count a preference signal implied by a discussed topic.
    pub fn record_preference(&mut self, signal: &str) {
        *self.preferences.entry(signal.to_string()).or_insert(0) += 1;
    }

    /// Bump the relationship score directly (quest reputation rewards).
    pub fn bump_relationship(&mut self, amount: u8, tuning: &DialogueTuning) {
        self.relationship = self
            .relationship
            .saturating_add(amount)
            .min(tuning.max_score);
    }

    pub fn times_discussed(&self, topic: &str) -> usize {
        self.topics_discussed.iter().filter(|t| t.as_str() == topic).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> DialogueTuning {
        DialogueTuning::default()
    }

    #[test]
    fn score_saturates_at_the_cap() {
        let tuning = tuning();
        let mut memory = ConversationMemory::new(Utc::now());
        for _ in 0..200 {
            memory.record(&[], &tuning, Utc::now());
            assert!(memory.relationship <= tuning.max_score);
        }
        assert_eq!(memory.relationship, tuning.max_score);
        assert_eq!(memory.interactions, 200);
    }

    #[test]
    fn topic_log_evicts_oldest_past_the_cap() {
        let tuning = DialogueTuning {
            topic_log_cap: 3,
            ..DialogueTuning::default()
        };
        let mut memory = ConversationMemory::new(Utc::now());
        for tag in ["a", "b", "c", "d", "e"] {
            memory.record(&[tag.to_string()], &tuning, Utc::now());
        }
        let logged: Vec<&str> = memory.topics_discussed.iter().map(String::as_str).collect();
        assert_eq!(logged, vec!["c", "d", "e"]);
    }

    #[test]
    fn tiers_follow_the_configured_bands() {
        let tuning = tuning();
        assert_eq!(tuning.tier(0), FamiliarityTier::Stranger);
        assert_eq!(tuning.tier(19), FamiliarityTier::Stranger);
        assert_eq!(tuning.tier(20), FamiliarityTier::Familiar);
        assert_eq!(tuning.tier(59), FamiliarityTier::Familiar);
        assert_eq!(tuning.tier(60), FamiliarityTier::Trusted);
        assert_eq!(tuning.tier(100), FamiliarityTier::Trusted);
    }

    #[test]
    fn empty_interaction_still_counts() {
        let tuning = tuning();
        let mut memory = ConversationMemory::new(Utc::now());
        memory.record(&[], &tuning, Utc::now());
        assert_eq!(memory.relationship, tuning.score_delta);
        assert_eq!(memory.interactions, 1);
        assert!(memory.topics_discussed.is_empty());
    }

    #[test]
    fn preferences_accumulate() {
        let mut memory = ConversationMemory::new(Utc::now());
        memory.record_preference("divine_beasts");
        memory.record_preference("divine_beasts");
        memory.record_preference("old_maps");
        assert_eq!(memory.preferences.get("divine_beasts"), Some(&2));
        assert_eq!(memory.preferences.get("old_maps"), Some(&1));
    }
}
