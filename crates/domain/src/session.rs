//! Point-in-time session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{PlayerId, SessionId};
use crate::position::{Position, Rotation};
use crate::region::Region;

/// An owned copy of one session's state. The registry hands these out so
/// callers never observe partial mutation of the live entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub player: PlayerId,
    pub name: String,
    pub position: Position,
    pub rotation: Rotation,
    pub region: Region,
    pub level: u32,
    pub experience: u32,
    pub last_update: DateTime<Utc>,
}
