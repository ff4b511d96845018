//! NPC definitions: static personality and knowledge tables.
//!
//! Definitions are immutable after load and shared read-only across all
//! sessions; everything that changes per player lives in
//! [`crate::dialogue::ConversationMemory`].

use serde::{Deserialize, Serialize};

use crate::dialogue::FamiliarityTier;
use crate::ids::NpcId;
use crate::region::Region;

/// Fixed personality archetypes. The personality selects the textual
/// flourish applied to every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    Wise,
    Friendly,
    Mysterious,
    Practical,
}

impl Personality {
    pub fn key(&self) -> &'static str {
        match self {
            Personality::Wise => "wise",
            Personality::Friendly => "friendly",
            Personality::Mysterious => "mysterious",
            Personality::Practical => "practical",
        }
    }

    /// Fixed prefix applied to responses, if any.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Personality::Wise => Some("As the ancient texts teach: "),
            Personality::Friendly => Some("Namaste, friend. "),
            Personality::Mysterious | Personality::Practical => None,
        }
    }

    /// Fixed suffix applied to responses, if any.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Personality::Mysterious => Some(" ...or so the winds whisper."),
            Personality::Practical => Some(" Trust your instincts out there."),
            Personality::Wise | Personality::Friendly => None,
        }
    }

    /// Wrap a response body in this personality's flourish.
    pub fn embellish(&self, body: &str) -> String {
        let mut text = String::new();
        if let Some(prefix) = self.prefix() {
            text.push_str(prefix);
        }
        text.push_str(body);
        if let Some(suffix) = self.suffix() {
            text.push_str(suffix);
        }
        text
    }
}

/// Response variants per familiarity tier. Variants within a tier are
/// rotated through across a conversation so repeat questions do not repeat
/// verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSet {
    pub stranger: Vec<String>,
    pub familiar: Vec<String>,
    pub trusted: Vec<String>,
}

impl ResponseSet {
    /// Same lines regardless of familiarity.
    pub fn uniform(lines: Vec<String>) -> Self {
        Self {
            stranger: lines.clone(),
            familiar: lines.clone(),
            trusted: lines,
        }
    }

    pub fn for_tier(&self, tier: FamiliarityTier) -> &[String] {
        let lines = match tier {
            FamiliarityTier::Stranger => &self.stranger,
            FamiliarityTier::Familiar => &self.familiar,
            FamiliarityTier::Trusted => &self.trusted,
        };
        if lines.is_empty() {
            // fall back to the stranger lines rather than producing nothing
            &self.stranger
        } else {
            lines
        }
    }
}

/// One topic an NPC knows about. Topics are ordered by priority within the
/// NPC definition: when several match, the earliest drives the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeTopic {
    /// Stable tag recorded in the discussion log (e.g. "garuda").
    pub tag: String,
    /// Case-insensitive keywords that trigger this topic.
    pub keywords: Vec<String>,
    /// Below this player level the NPC holds back the full answer.
    pub min_level: u32,
    /// What the NPC says instead when the player is below `min_level`.
    pub novice_caution: Option<String>,
    /// Preference signal recorded when this topic is discussed.
    pub preference: Option<String>,
    pub responses: ResponseSet,
}

impl KnowledgeTopic {
    pub fn new(tag: impl Into<String>, keywords: Vec<&str>, responses: ResponseSet) -> Self {
        Self {
            tag: tag.into(),
            keywords: keywords.into_iter().map(str::to_string).collect(),
            min_level: 1,
            novice_caution: None,
            preference: None,
            responses,
        }
    }

    pub fn with_min_level(mut self, level: u32, caution: impl Into<String>) -> Self {
        self.min_level = level;
        self.novice_caution = Some(caution.into());
        self
    }

    pub fn with_preference(mut self, signal: impl Into<String>) -> Self {
        self.preference = Some(signal.into());
        self
    }
}

/// An NPC as loaded from the content tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcDefinition {
    pub id: NpcId,
    pub name: String,
    pub personality: Personality,
    pub home_region: Region,
    /// Priority-ordered knowledge topics.
    pub topics: Vec<KnowledgeTopic>,
    /// Generic responses when no topic matched (or the input was empty).
    pub fallback: ResponseSet,
}

impl NpcDefinition {
    pub fn topic(&self, tag: &str) -> Option<&KnowledgeTopic> {
        self.topics.iter().find(|topic| topic.tag == tag)
    }
}
