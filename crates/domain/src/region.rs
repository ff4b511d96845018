//! World regions and the position-to-region classifier.
//!
//! The world is partitioned into five named regions by axis-aligned
//! boundary tests. Classification is pure and total: the boundary table is
//! checked in order and the fallback region absorbs everything the table
//! does not claim, so every position maps to exactly one region.

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// The five regions of Ancient Bharat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    DustPlains,
    HimalayanPeaks,
    IndrapuraCity,
    NarmadaForest,
    OceanFrontier,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::DustPlains,
        Region::HimalayanPeaks,
        Region::IndrapuraCity,
        Region::NarmadaForest,
        Region::OceanFrontier,
    ];

    /// Stable key used on the wire and in snapshots.
    pub fn key(&self) -> &'static str {
        match self {
            Region::DustPlains => "dust_plains",
            Region::HimalayanPeaks => "himalayan_peaks",
            Region::IndrapuraCity => "indrapura_city",
            Region::NarmadaForest => "narmada_forest",
            Region::OceanFrontier => "ocean_frontier",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Region boundary coordinates. These are configuration, not behavior: the
/// classifier only requires that the resulting table partitions the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// West of this x is the Dust Plains.
    pub dust_plains_max_x: f32,
    /// East of this x is the Ocean Frontier.
    pub ocean_frontier_min_x: f32,
    /// North of this z is the Himalayan Peaks.
    pub himalayan_peaks_min_z: f32,
    /// South of this z is the Narmada Forest.
    pub narmada_forest_max_z: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            dust_plains_max_x: -200.0,
            ocean_frontier_min_x: 200.0,
            himalayan_peaks_min_z: 200.0,
            narmada_forest_max_z: -100.0,
        }
    }
}

/// A single ordered boundary test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryTest {
    XBelow(f32),
    XAbove(f32),
    ZAbove(f32),
    ZBelow(f32),
}

impl BoundaryTest {
    fn matches(&self, position: Position) -> bool {
        match self {
            BoundaryTest::XBelow(limit) => position.x < *limit,
            BoundaryTest::XAbove(limit) => position.x > *limit,
            BoundaryTest::ZAbove(limit) => position.z > *limit,
            BoundaryTest::ZBelow(limit) => position.z < *limit,
        }
    }
}

/// Ordered boundary table with a mandatory fallback region.
///
/// Tests run in order; the first match wins and the fallback catches every
/// remaining point, so `classify` never fails.
#[derive(Debug, Clone)]
pub struct RegionMap {
    table: Vec<(Region, BoundaryTest)>,
    fallback: Region,
}

impl RegionMap {
    pub fn new(table: Vec<(Region, BoundaryTest)>, fallback: Region) -> Self {
        Self { table, fallback }
    }

    /// The canonical Ancient Bharat layout: desert west, ocean east,
    /// mountains north, forest south, the city in the middle.
    pub fn with_bounds(bounds: &WorldBounds) -> Self {
        Self::new(
            vec![
                (Region::DustPlains, BoundaryTest::XBelow(bounds.dust_plains_max_x)),
                (
                    Region::OceanFrontier,
                    BoundaryTest::XAbove(bounds.ocean_frontier_min_x),
                ),
                (
                    Region::HimalayanPeaks,
                    BoundaryTest::ZAbove(bounds.himalayan_peaks_min_z),
                ),
                (
                    Region::NarmadaForest,
                    BoundaryTest::ZBelow(bounds.narmada_forest_max_z),
                ),
            ],
            Region::IndrapuraCity,
        )
    }

    /// Map a position to its region. Pure and total.
    pub fn classify(&self, position: Position) -> Region {
        self.table
            .iter()
            .find(|(_, test)| test.matches(position))
            .map(|(region, _)| *region)
            .unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> Region {
        self.fallback
    }
}

impl Default for RegionMap {
    fn default() -> Self {
        Self::with_bounds(&WorldBounds::default())
    }
}
