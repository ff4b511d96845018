//! Directory of player profiles, online or not.
//!
//! The registry holds the live copy of a connected player's profile; this
//! directory is the durable side, written back on disconnect and folded
//! into each snapshot. A returning player resumes from their stored
//! profile regardless of how long they were away.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use horizon_domain::{PlayerId, PlayerProfile, Position};

#[derive(Default)]
pub struct PlayerDirectory {
    profiles: DashMap<PlayerId, PlayerProfile>,
}

impl PlayerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the stored profile for a connecting player, creating a fresh
    /// one at the spawn point on first sight. The stored display name wins
    /// over the one supplied at connect time, matching what returning
    /// players expect.
    pub fn checkout(
        &self,
        player: &PlayerId,
        requested_name: &str,
        spawn: Position,
        now: DateTime<Utc>,
    ) -> PlayerProfile {
        self.profiles
            .entry(player.clone())
            .or_insert_with(|| PlayerProfile::new(requested_name, spawn, now))
            .clone()
    }

    /// Write a profile back (on disconnect and before each snapshot).
    pub fn store(&self, player: PlayerId, profile: PlayerProfile) {
        self.profiles.insert(player, profile);
    }

    pub fn get(&self, player: &PlayerId) -> Option<PlayerProfile> {
        self.profiles.get(player).map(|entry| entry.value().clone())
    }

    pub fn export(&self) -> BTreeMap<PlayerId, PlayerProfile> {
        self.profiles
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn import(&self, profiles: BTreeMap<PlayerId, PlayerProfile>) {
        for (player, profile) in profiles {
            self.profiles.insert(player, profile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_creates_then_reuses() {
        let directory = PlayerDirectory::new();
        let player = PlayerId::new("p1");
        let spawn = Position::new(250.0, 2.0, 0.0);

        let fresh = directory.checkout(&player, "Asha", spawn, Utc::now());
        assert_eq!(fresh.name, "Asha");
        assert_eq!(fresh.level, 1);

        let mut leveled = fresh.clone();
        leveled.add_experience(2500);
        directory.store(player.clone(), leveled);

        // the stored name and progress survive a reconnect under a new name
        let restored = directory.checkout(&player, "SomeoneElse", spawn, Utc::now());
        assert_eq!(restored.name, "Asha");
        assert_eq!(restored.level, 3);
    }
}
