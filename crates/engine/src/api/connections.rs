//! Session registry for WebSocket clients.
//!
//! Owns the set of live sessions: identity, transient position state, the
//! per-connection outbound channel, and the player's profile while they are
//! online. Mutations take the write lock; all read surfaces hand out owned
//! snapshots so callers never observe partial mutation.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, RwLock};

use horizon_domain::{
    ItemId, PlayerId, PlayerProfile, Position, Region, Rotation, SessionEvent, SessionId,
    SessionSnapshot,
};
use horizon_shared::ServerMessage;

/// One live session.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub player: PlayerId,
    pub profile: PlayerProfile,
    pub position: Position,
    pub rotation: Rotation,
    pub region: Region,
    pub last_update: DateTime<Utc>,
}

impl Session {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            player: self.player.clone(),
            name: self.profile.name.clone(),
            position: self.position,
            rotation: self.rotation,
            region: self.region,
            level: self.profile.level,
            experience: self.profile.experience,
            last_update: self.last_update,
        }
    }
}

/// Result of a position update, carrying what the coordinator needs to
/// detect region transitions.
#[derive(Debug, Clone)]
pub struct PositionUpdate {
    pub previous_region: Region,
    pub snapshot: SessionSnapshot,
}

/// Manages all active sessions.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, (Session, mpsc::Sender<ServerMessage>)>>,
    capacity: usize,
}

impl SessionRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Register a new session with a freshly generated id.
    ///
    /// Fails only when the connection handle is already dead or the server
    /// is at capacity; both are reported to the operator, not the client.
    pub async fn register(
        &self,
        player: PlayerId,
        profile: PlayerProfile,
        position: Position,
        region: Region,
        sender: mpsc::Sender<ServerMessage>,
    ) -> Result<SessionEvent, RegistryError> {
        if sender.is_closed() {
            return Err(RegistryError::ConnectionClosed);
        }
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.capacity {
            return Err(RegistryError::AtCapacity(self.capacity));
        }
        let session = Session {
            id: SessionId::new(),
            player,
            profile,
            position,
            rotation: Rotation::default(),
            region,
            last_update: Utc::now(),
        };
        let snapshot = session.snapshot();
        sessions.insert(session.id, (session, sender));
        tracing::debug!(session_id = %snapshot.id, player = %snapshot.player, "Session registered");
        Ok(SessionEvent::PlayerJoined(snapshot))
    }

    /// Overwrite position/rotation and the last-update timestamp.
    ///
    /// A no-op for unknown ids: the session may have been unregistered by a
    /// concurrent disconnect, which is expected, not an error.
    pub async fn update_position(
        &self,
        id: SessionId,
        position: Position,
        rotation: Rotation,
        region: Region,
    ) -> Option<PositionUpdate> {
        let mut sessions = self.sessions.write().await;
        let (session, _) = sessions.get_mut(&id)?;
        let previous_region = session.region;
        session.position = position;
        session.rotation = rotation;
        session.region = region;
        session.profile.last_position = position;
        session.last_update = Utc::now();
        Some(PositionUpdate {
            previous_region,
            snapshot: session.snapshot(),
        })
    }

    /// Remove a session, returning its last known state and profile.
    /// Idempotent: the second call is a no-op returning `None`.
    pub async fn unregister(&self, id: SessionId) -> Option<(SessionEvent, PlayerProfile)> {
        let mut sessions = self.sessions.write().await;
        let (mut session, _) = sessions.remove(&id)?;
        session.profile.last_seen = Utc::now();
        tracing::debug!(session_id = %id, player = %session.player, "Session unregistered");
        Some((
            SessionEvent::PlayerLeft(session.snapshot()),
            session.profile,
        ))
    }

    pub async fn get(&self, id: SessionId) -> Option<SessionSnapshot> {
        let sessions = self.sessions.read().await;
        sessions.get(&id).map(|(session, _)| session.snapshot())
    }

    pub async fn profile(&self, id: SessionId) -> Option<PlayerProfile> {
        let sessions = self.sessions.read().await;
        sessions.get(&id).map(|(session, _)| session.profile.clone())
    }

    /// Point-in-time copy of every live session.
    pub async fn list_active(&self) -> Vec<SessionSnapshot> {
        let sessions = self.sessions.read().await;
        sessions.values().map(|(session, _)| session.snapshot()).collect()
    }

    pub async fn count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    pub async fn population_by_region(&self) -> BTreeMap<Region, usize> {
        let sessions = self.sessions.read().await;
        let mut populations = BTreeMap::new();
        for (session, _) in sessions.values() {
            *populations.entry(session.region).or_insert(0) += 1;
        }
        populations
    }

    /// Grant experience. Returns the new level when a threshold is crossed,
    /// `None` otherwise or when the session is gone.
    pub async fn add_experience(&self, id: SessionId, amount: u32) -> Option<u32> {
        let mut sessions = self.sessions.write().await;
        let (session, _) = sessions.get_mut(&id)?;
        session.profile.add_experience(amount)
    }

    /// Record a region visit; true on the first visit.
    pub async fn record_visit(&self, id: SessionId, region: Region) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some((session, _)) => session.profile.record_visit(region),
            None => false,
        }
    }

    /// Record a collected object; true if newly collected.
    pub async fn collect_item(&self, id: SessionId, item: ItemId) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some((session, _)) => session.profile.collect_item(item),
            None => false,
        }
    }

    /// Send to every session. Best-effort: a full or closed channel drops
    /// the message for that session only.
    pub async fn broadcast_to_all(&self, message: ServerMessage) {
        let sessions = self.sessions.read().await;
        for (session, sender) in sessions.values() {
            if let Err(error) = sender.try_send(message.clone()) {
                tracing::warn!(
                    session_id = %session.id,
                    error = %error,
                    "Failed to broadcast message"
                );
            }
        }
    }

    /// Send to every session except one (typically the originator).
    pub async fn broadcast_to_others(&self, exclude: SessionId, message: ServerMessage) {
        let sessions = self.sessions.read().await;
        for (session, sender) in sessions.values() {
            if session.id == exclude {
                continue;
            }
            if let Err(error) = sender.try_send(message.clone()) {
                tracing::warn!(
                    session_id = %session.id,
                    error = %error,
                    "Failed to broadcast message"
                );
            }
        }
    }

    /// Unicast to one session. A no-op for unknown ids.
    pub async fn send_to(&self, id: SessionId, message: ServerMessage) {
        let sessions = self.sessions.read().await;
        if let Some((session, sender)) = sessions.get(&id) {
            if let Err(error) = sender.try_send(message) {
                tracing::warn!(
                    session_id = %session.id,
                    error = %error,
                    "Failed to send message"
                );
            }
        }
    }
}

/// Errors that can occur during session registration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistryError {
    #[error("connection closed before registration")]
    ConnectionClosed,
    #[error("server at capacity ({0} sessions)")]
    AtCapacity(usize),
}
