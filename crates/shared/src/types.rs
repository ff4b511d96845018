//! Wire-format DTOs.
//!
//! Plain data carried inside the message envelopes. Identifiers are raw
//! strings on the wire; region keys use the domain enum's stable snake_case
//! form.

use horizon_domain::{Position, Region, Rotation, SessionSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionData {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Position> for PositionData {
    fn from(value: Position) -> Self {
        Self {
            x: value.x,
            y: value.y,
            z: value.z,
        }
    }
}

impl From<PositionData> for Position {
    fn from(value: PositionData) -> Self {
        Position::new(value.x, value.y, value.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationData {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Rotation> for RotationData {
    fn from(value: Rotation) -> Self {
        Self {
            x: value.x,
            y: value.y,
            z: value.z,
        }
    }
}

impl From<RotationData> for Rotation {
    fn from(value: RotationData) -> Self {
        Rotation::new(value.x, value.y, value.z)
    }
}

/// Another player's visible state, as carried by `player_joined`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerData {
    pub id: String,
    pub name: String,
    pub position: PositionData,
    pub region: Region,
    pub level: u32,
}

impl From<&SessionSnapshot> for PlayerData {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            id: snapshot.player.as_str().to_string(),
            name: snapshot.name.clone(),
            position: snapshot.position.into(),
            region: snapshot.region,
            level: snapshot.level,
        }
    }
}

/// Region presentation data from the content tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionData {
    pub key: Region,
    pub name: String,
    pub description: String,
    pub atmosphere_color: [f32; 3],
}

/// An NPC visible in the player's current region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcData {
    pub id: String,
    pub name: String,
    pub personality: String,
}

/// One quest as shown in the player's quest log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub state: String,
    pub objectives_total: usize,
    pub objectives_completed: usize,
    pub current_objective: Option<String>,
}

/// One chat line, also used for history replay on join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntryData {
    pub player_id: String,
    pub player_name: String,
    pub message: String,
    pub region: Region,
    pub timestamp: i64,
}

/// Per-region population for the status surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPopulationData {
    pub region: Region,
    pub name: String,
    pub players: usize,
}
