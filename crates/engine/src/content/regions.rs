//! The five regions of Ancient Bharat.

use std::collections::BTreeMap;

use horizon_domain::Region;

use super::RegionInfo;

pub(super) fn region_table() -> BTreeMap<Region, RegionInfo> {
    let mut regions = BTreeMap::new();

    regions.insert(
        Region::DustPlains,
        RegionInfo {
            region: Region::DustPlains,
            name: "The Dust Plains".to_string(),
            description: "Endless sands hide ancient secrets and forgotten ruins".to_string(),
            atmosphere_color: [0.9, 0.7, 0.4],
            special_locations: vec![
                "Ancient Ruins".to_string(),
                "Oasis of Memory".to_string(),
                "Caravan Rest".to_string(),
            ],
            terrain: "desert".to_string(),
        },
    );

    regions.insert(
        Region::HimalayanPeaks,
        RegionInfo {
            region: Region::HimalayanPeaks,
            name: "Himalayan Peaks".to_string(),
            description: "Sacred mountains where sages meditate in eternal snow".to_string(),
            atmosphere_color: [0.8, 0.9, 1.0],
            special_locations: vec![
                "Mountain Monastery".to_string(),
                "Prayer Flag Valley".to_string(),
                "Ice Cave Shrine".to_string(),
            ],
            terrain: "mountains".to_string(),
        },
    );

    regions.insert(
        Region::IndrapuraCity,
        RegionInfo {
            region: Region::IndrapuraCity,
            name: "Indrapura City".to_string(),
            description: "Bustling metropolis where cultures meet and stories are born"
                .to_string(),
            atmosphere_color: [1.0, 0.8, 0.5],
            special_locations: vec![
                "Royal Palace".to_string(),
                "Grand Bazaar".to_string(),
                "Temple Complex".to_string(),
            ],
            terrain: "urban".to_string(),
        },
    );

    regions.insert(
        Region::NarmadaForest,
        RegionInfo {
            region: Region::NarmadaForest,
            name: "Narmada Forest".to_string(),
            description: "Dense jungle where ancient wisdom sleeps among banyan trees"
                .to_string(),
            atmosphere_color: [0.2, 0.7, 0.2],
            special_locations: vec![
                "Sacred Grove".to_string(),
                "Hermit's Hut".to_string(),
                "Ancient Banyan".to_string(),
            ],
            terrain: "forest".to_string(),
        },
    );

    regions.insert(
        Region::OceanFrontier,
        RegionInfo {
            region: Region::OceanFrontier,
            name: "Ocean Frontier".to_string(),
            description: "Coastal haven where all great journeys begin".to_string(),
            atmosphere_color: [0.4, 0.7, 1.0],
            special_locations: vec![
                "Lighthouse".to_string(),
                "Fishing Village".to_string(),
                "Shrine by the Sea".to_string(),
            ],
            terrain: "coastal".to_string(),
        },
    );

    regions
}
