//! Engine configuration.
//!
//! Network and persistence settings come from the environment (with
//! defaults suitable for local development); gameplay tuning lives here so
//! tests can construct variants without touching the process environment.

use std::path::PathBuf;
use std::time::Duration;

use horizon_domain::{DialogueTuning, Position, WorldBounds};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub host: String,
    pub port: u16,
    /// Where new travelers appear: the Ocean Frontier coast.
    pub spawn_position: Position,
    pub world_bounds: WorldBounds,
    pub tuning: DialogueTuning,
    pub snapshot_path: PathBuf,
    pub snapshot_interval: Duration,
    /// Refuse registrations past this many live sessions.
    pub max_sessions: usize,
    /// Retained chat lines replayed to joining players.
    pub chat_history_cap: usize,
    /// Ground-plane distance within which a world object is picked up.
    pub pickup_radius: f32,
    /// Experience granted for a first visit to a region.
    pub exploration_xp: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            spawn_position: Position::new(250.0, 2.0, 0.0),
            world_bounds: WorldBounds::default(),
            tuning: DialogueTuning::default(),
            snapshot_path: PathBuf::from("game_data/snapshot.json"),
            snapshot_interval: Duration::from_secs(300),
            max_sessions: 100,
            chat_history_cap: 100,
            pickup_radius: 5.0,
            exploration_xp: 100,
        }
    }
}

impl EngineConfig {
    /// Read overrides from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            config.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .and_then(|value| value.parse().ok())
        {
            config.port = port;
        }
        if let Ok(path) = std::env::var("SNAPSHOT_PATH") {
            config.snapshot_path = PathBuf::from(path);
        }
        if let Some(interval) = std::env::var("SNAPSHOT_INTERVAL_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
        {
            config.snapshot_interval = Duration::from_secs(interval);
        }
        if let Some(max_sessions) = std::env::var("MAX_PLAYERS")
            .ok()
            .and_then(|value| value.parse().ok())
        {
            config.max_sessions = max_sessions;
        }
        config
    }
}
