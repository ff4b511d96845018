//! WebSocket message types for Engine-Client communication.
//!
//! Both directions use a tagged envelope: a `type` discriminator in
//! snake_case plus the variant's fields inline. Unknown inbound `type`
//! values fail to parse; the engine drops them without closing the
//! connection.

use horizon_domain::Region;
use serde::{Deserialize, Serialize};

use crate::types::{
    ChatEntryData, NpcData, PlayerData, PositionData, QuestData, RegionData,
    RegionPopulationData, RotationData,
};

/// Messages from client to engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// First message on every connection; identifies the player.
    Connect {
        player_id: String,
        player_name: String,
    },
    /// Position/rotation update.
    Move {
        position: PositionData,
        rotation: RotationData,
    },
    /// World chat, broadcast to everyone including the sender.
    Chat { message: String },
    /// Talk to an NPC; the response is unicast back.
    NpcInteraction { npc_id: String, message: String },
    /// Read-only status query (active players, per-region population).
    StatusQuery,
}

impl ClientMessage {
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Malformed)
    }
}

/// Messages from engine to client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Unicast reply to `connect`.
    Welcome {
        player_id: String,
        message: String,
        position: PositionData,
        region: RegionData,
        level: u32,
        experience: u32,
        regions_visited: Vec<Region>,
    },
    /// Broadcast to everyone except the new arrival; also unicast once per
    /// existing session to the new arrival (roster catch-up).
    PlayerJoined { player: PlayerData },
    /// Broadcast to everyone except the sender.
    PlayerMoved {
        player_id: String,
        position: PositionData,
        rotation: RotationData,
        region: Region,
    },
    /// Broadcast to everyone including the sender.
    Chat(ChatEntryData),
    /// Unicast replay of recent chat on join.
    ChatHistory { messages: Vec<ChatEntryData> },
    /// Unicast on region transition.
    RegionChanged {
        old_region: Region,
        new_region: RegionData,
        experience_gained: u32,
        message: String,
    },
    /// Unicast: NPCs available in the player's current region.
    NpcsInRegion { region: Region, npcs: Vec<NpcData> },
    /// Unicast reply to `npc_interaction`.
    NpcInteraction { npc_id: String, response: String },
    /// Broadcast when a session ends.
    PlayerLeft { player_id: String, name: String },
    /// Unicast: the player's visible quest log.
    QuestLog { quests: Vec<QuestData> },
    /// Unicast: a quest moved from available to in-progress.
    QuestStarted { quest_id: String, title: String },
    /// Unicast: progress or completion of a single objective.
    QuestObjective {
        quest_id: String,
        objective_id: String,
        description: String,
        current: u32,
        required: u32,
        completed: bool,
    },
    /// Unicast: the quest finished and its reward was applied.
    QuestCompleted {
        quest_id: String,
        title: String,
        experience_gained: u32,
    },
    /// Unicast when a world object is picked up.
    ItemCollected { item_id: String, name: String },
    /// Unicast when accumulated experience crosses a level threshold.
    LevelUp { level: u32 },
    /// Unicast reply to `status_query`.
    Status {
        players_online: usize,
        regions: Vec<RegionPopulationData>,
    },
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Malformed)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_domain::Region;

    #[test]
    fn connect_parses_from_the_wire_form() {
        let msg = ClientMessage::parse(
            r#"{"type":"connect","player_id":"p1","player_name":"Asha"}"#,
        )
        .expect("parse");
        assert_eq!(
            msg,
            ClientMessage::Connect {
                player_id: "p1".to_string(),
                player_name: "Asha".to_string(),
            }
        );
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(ClientMessage::parse(r#"{"type":"teleport","x":1}"#).is_err());
        assert!(ClientMessage::parse("not json").is_err());
    }

    #[test]
    fn missing_required_field_is_rejected() {
        assert!(ClientMessage::parse(r#"{"type":"connect","player_id":"p1"}"#).is_err());
    }

    #[test]
    fn server_messages_carry_the_type_tag() {
        let msg = ServerMessage::PlayerLeft {
            player_id: "p1".to_string(),
            name: "Asha".to_string(),
        };
        let json = msg.to_json().expect("serialize");
        assert!(json.contains(r#""type":"player_left""#));
    }

    #[test]
    fn chat_round_trips() {
        let msg = ServerMessage::Chat(ChatEntryData {
            player_id: "p1".to_string(),
            player_name: "Asha".to_string(),
            message: "namaste".to_string(),
            region: Region::OceanFrontier,
            timestamp: 1_700_000_000,
        });
        let json = msg.to_json().expect("serialize");
        assert!(json.contains(r#""type":"chat""#));
        let back: ServerMessage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, msg);
    }
}
