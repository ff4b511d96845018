//! Durable per-player state that outlives a single connection.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ItemId;
use crate::position::Position;
use crate::region::Region;

/// Experience required per level. The curve is configuration in spirit;
/// only monotonicity matters for correctness.
pub const XP_PER_LEVEL: u32 = 1000;

/// Derive a level from total experience. Monotonically non-decreasing.
pub fn level_for_experience(experience: u32) -> u32 {
    1 + experience / XP_PER_LEVEL
}

/// A player's persistent profile: everything the snapshot store keeps
/// between connections. Created on first connect, restored on reconnect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub level: u32,
    pub experience: u32,
    pub regions_visited: BTreeSet<Region>,
    pub collected_items: BTreeSet<ItemId>,
    pub last_position: Position,
    pub last_seen: DateTime<Utc>,
}

impl PlayerProfile {
    /// Fresh profile starting at the spawn point on the Ocean Frontier.
    pub fn new(name: impl Into<String>, spawn: Position, now: DateTime<Utc>) -> Self {
        let mut regions_visited = BTreeSet::new();
        regions_visited.insert(Region::OceanFrontier);
        Self {
            name: name.into(),
            level: 1,
            experience: 0,
            regions_visited,
            collected_items: BTreeSet::new(),
            last_position: spawn,
            last_seen: now,
        }
    }

    /// Grant experience. Returns the new level if a threshold was crossed.
    pub fn add_experience(&mut self, amount: u32) -> Option<u32> {
        self.experience = self.experience.saturating_add(amount);
        let level = level_for_experience(self.experience);
        if level > self.level {
            self.level = level;
            Some(level)
        } else {
            None
        }
    }

    /// Record a region visit. Returns true on the first visit.
    pub fn record_visit(&mut self, region: Region) -> bool {
        self.regions_visited.insert(region)
    }

    /// Record a collected world object. Returns true if newly collected.
    pub fn collect_item(&mut self, item: ItemId) -> bool {
        self.collected_items.insert(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> PlayerProfile {
        PlayerProfile::new("Asha", Position::new(250.0, 2.0, 0.0), Utc::now())
    }

    #[test]
    fn level_curve_is_monotonic() {
        let mut previous = 0;
        for xp in (0..10_000).step_by(250) {
            let level = level_for_experience(xp);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn add_experience_reports_level_ups() {
        let mut profile = profile();
        assert_eq!(profile.add_experience(500), None);
        assert_eq!(profile.add_experience(600), Some(2));
        assert_eq!(profile.level, 2);
        assert_eq!(profile.experience, 1100);
    }

    #[test]
    fn experience_saturates_instead_of_wrapping() {
        let mut profile = profile();
        profile.experience = u32::MAX - 10;
        profile.level = level_for_experience(profile.experience);
        profile.add_experience(1000);
        assert_eq!(profile.experience, u32::MAX);
    }

    #[test]
    fn first_visit_is_reported_once() {
        let mut profile = profile();
        assert!(profile.record_visit(Region::IndrapuraCity));
        assert!(!profile.record_visit(Region::IndrapuraCity));
        // spawn region was already visited
        assert!(!profile.record_visit(Region::OceanFrontier));
    }

    #[test]
    fn items_collect_once() {
        let mut profile = profile();
        let fragment = ItemId::new("sarasvati_fragment_1");
        assert!(profile.collect_item(fragment.clone()));
        assert!(!profile.collect_item(fragment));
    }
}
