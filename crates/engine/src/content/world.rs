//! Collectible objects placed across the world.

use horizon_domain::{ItemId, Position, Region};

use super::WorldObject;

fn object(
    id: &str,
    item: &str,
    name: &str,
    position: Position,
    region: Region,
) -> WorldObject {
    WorldObject {
        id: ItemId::new(id),
        item: ItemId::new(item),
        name: name.to_string(),
        position,
        region,
    }
}

pub(super) fn world_objects() -> Vec<WorldObject> {
    vec![
        // Sarasvati Map fragments for the main chain
        object(
            "fragment_dust_ruins",
            "sarasvati_fragment",
            "Sarasvati Map Fragment",
            Position::new(-320.0, 0.0, 20.0),
            Region::DustPlains,
        ),
        object(
            "fragment_spirit_grove",
            "sarasvati_fragment",
            "Sarasvati Map Fragment",
            Position::new(40.0, 0.0, -180.0),
            Region::NarmadaForest,
        ),
        // Sanskrit inscriptions for the cultural quest
        object(
            "inscription_ruins",
            "sanskrit_inscription",
            "Weathered Sanskrit Inscription",
            Position::new(-260.0, 0.0, -40.0),
            Region::DustPlains,
        ),
        object(
            "inscription_temple",
            "sanskrit_inscription",
            "Temple Wall Inscription",
            Position::new(20.0, 0.0, 60.0),
            Region::IndrapuraCity,
        ),
        object(
            "inscription_shrine",
            "sanskrit_inscription",
            "Ice Cave Inscription",
            Position::new(-30.0, 40.0, 260.0),
            Region::HimalayanPeaks,
        ),
        // Building materials for the village
        object(
            "materials_wharf",
            "building_materials",
            "Coil of Fishing Rope",
            Position::new(280.0, 0.0, 30.0),
            Region::OceanFrontier,
        ),
        object(
            "materials_grove",
            "building_materials",
            "Seasoned Banyan Timber",
            Position::new(80.0, 0.0, -140.0),
            Region::NarmadaForest,
        ),
        object(
            "materials_bazaar",
            "building_materials",
            "Bundle of Clay Bricks",
            Position::new(-40.0, 0.0, 10.0),
            Region::IndrapuraCity,
        ),
    ]
}
