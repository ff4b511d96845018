//! Static content tables: regions, NPCs, quests, and collectible world
//! objects.
//!
//! Everything here is loaded once at startup and shared read-only. The
//! tables replace scattered conditionals with explicit data so content can
//! be tested in isolation from the server.

mod npcs;
mod quests;
mod regions;
mod world;

use std::collections::BTreeMap;

use horizon_domain::{
    ItemId, NpcDefinition, NpcId, Position, QuestDefinition, QuestId, Region, RegionMap,
    WorldBounds,
};
use horizon_shared::RegionData;

/// Presentation data for one region.
#[derive(Debug, Clone)]
pub struct RegionInfo {
    pub region: Region,
    pub name: String,
    pub description: String,
    pub atmosphere_color: [f32; 3],
    pub special_locations: Vec<String>,
    pub terrain: String,
}

impl RegionInfo {
    pub fn to_data(&self) -> RegionData {
        RegionData {
            key: self.region,
            name: self.name.clone(),
            description: self.description.clone(),
            atmosphere_color: self.atmosphere_color,
        }
    }
}

/// A collectible object placed in the world. `id` is unique per placement;
/// `item` names the kind credited to quest objectives.
#[derive(Debug, Clone)]
pub struct WorldObject {
    pub id: ItemId,
    pub item: ItemId,
    pub name: String,
    pub position: Position,
    pub region: Region,
}

/// All immutable game content, assembled once at startup.
#[derive(Debug)]
pub struct ContentLibrary {
    pub region_map: RegionMap,
    regions: BTreeMap<Region, RegionInfo>,
    pub npcs: BTreeMap<NpcId, NpcDefinition>,
    /// Definition order is evaluation order for quest events.
    pub quests: Vec<QuestDefinition>,
    pub world_objects: Vec<WorldObject>,
}

impl ContentLibrary {
    /// The canonical Ancient Bharat content set.
    pub fn ancient_bharat(bounds: &WorldBounds) -> Self {
        Self {
            region_map: RegionMap::with_bounds(bounds),
            regions: regions::region_table(),
            npcs: npcs::npc_table(),
            quests: quests::quest_table(),
            world_objects: world::world_objects(),
        }
    }

    /// Region presentation data. Total: the constructor fills all five.
    pub fn region(&self, region: Region) -> &RegionInfo {
        self.regions
            .get(&region)
            .expect("content table covers every region")
    }

    pub fn quest(&self, id: &QuestId) -> Option<&QuestDefinition> {
        self.quests.iter().find(|quest| &quest.id == id)
    }

    pub fn npcs_in_region(&self, region: Region) -> Vec<&NpcDefinition> {
        self.npcs
            .values()
            .filter(|npc| npc.home_region == region)
            .collect()
    }
}
