//! Domain events.
//!
//! `GameEvent` is what the quest engine consumes; `SessionEvent` is emitted
//! by the registry on lifecycle changes and consumed by the coordinator for
//! fan-out.

use serde::{Deserialize, Serialize};

use crate::ids::{ItemId, NpcId};
use crate::region::Region;
use crate::session::SessionSnapshot;

/// Something a player did that may advance quest objectives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RegionEntered { region: Region },
    ItemCollected { item: ItemId, count: u32 },
    NpcInteracted { npc: NpcId },
    TopicDiscussed { npc: NpcId, topic: String },
}

/// Registry lifecycle event, carrying the session state the coordinator
/// needs to build the join/leave broadcasts.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    PlayerJoined(SessionSnapshot),
    PlayerLeft(SessionSnapshot),
}
