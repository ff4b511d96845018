//! Echoes of the Horizon protocol - shared types for engine/client communication.
//!
//! This crate contains everything a rendering client needs to speak to the
//! session server:
//! - WebSocket message envelopes (`ClientMessage`, `ServerMessage`)
//! - Wire-format DTOs
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - serde, serde_json, thiserror, and the
//!    domain vocabulary types only
//! 2. **No business logic** - pure data types and serialization
//! 3. **Raw string identifiers** - player/NPC/quest ids travel as strings

pub mod messages;
pub mod types;

pub use messages::{ClientMessage, ProtocolError, ServerMessage};
pub use types::{
    ChatEntryData, NpcData, PlayerData, PositionData, QuestData, RegionData,
    RegionPopulationData, RotationData,
};
